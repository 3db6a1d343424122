//! Shared value types for the content domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values with invariants (scores live in `[0.0, 100.0]`) and take
//! part in domain computations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Score types
// ---------------------------------------------------------------------------

/// A quality, SEO, readability, or brand-voice score in the range `[0.0, 100.0]`.
///
/// Scores parsed from model output are clamped rather than rejected, because a
/// model answering `120` still means "very good".
///
/// Deserialization clamps as well, so a hand-edited history file cannot bring
/// an out-of-range score back in.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64")]
pub struct Score(f64);

impl Score {
    /// Lower bound of the score range.
    pub const MIN: f64 = 0.0;
    /// Upper bound of the score range.
    pub const MAX: f64 = 100.0;

    /// Score used when a model response omits a value.
    pub const FALLBACK: Score = Score(75.0);

    /// Creates a [`Score`], returning `None` if `value` is outside
    /// `[0.0, 100.0]` or not finite.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Creates a [`Score`], clamping `value` into `[0.0, 100.0]`.
    ///
    /// NaN maps to zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self(Self::MIN)
        } else {
            Self(value.clamp(Self::MIN, Self::MAX))
        }
    }

    /// A score of exactly zero.
    pub fn zero() -> Self {
        Self(Self::MIN)
    }

    /// Returns the score as an `f64` in `[0.0, 100.0]`.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::clamped(value)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_score_stays_in_range() {
        assert_eq!(Score::clamped(150.0).as_f64(), 100.0);
        assert_eq!(Score::clamped(-3.0).as_f64(), 0.0);
        assert_eq!(Score::clamped(f64::NAN).as_f64(), 0.0);
        assert_eq!(Score::clamped(42.5).as_f64(), 42.5);
    }

    #[test]
    fn new_score_rejects_out_of_range() {
        assert!(Score::new(100.1).is_none());
        assert!(Score::new(f64::INFINITY).is_none());
        assert!(Score::new(0.0).is_some());
    }

    #[test]
    fn score_serialises_as_bare_number() {
        let json = serde_json::to_string(&Score::clamped(88.0)).unwrap();
        assert_eq!(json, "88.0");
    }

    #[test]
    fn deserialised_score_is_clamped() {
        let high: Score = serde_json::from_str("150.0").unwrap();
        assert_eq!(high.as_f64(), 100.0);
        let low: Score = serde_json::from_str("-4").unwrap();
        assert_eq!(low.as_f64(), 0.0);
        let ok: Score = serde_json::from_str("81.5").unwrap();
        assert_eq!(ok.as_f64(), 81.5);
    }
}
