//! Copydesk text analysis adapters.
//!
//! Implements the text-analysis ports of the [`pipeline`] crate:
//!
//! - [`StatisticalKeywordExtractor`]: [`pipeline::KeywordExtractor`] using
//!   unsupervised n-gram statistics (no model, no network).
//! - [`FleschScorer`]: [`pipeline::ReadabilityScorer`] computing Flesch
//!   Reading Ease with a vowel-group syllable estimate.
//!
//! [`ReadabilityReport`] and [`check_basic_style`] back the `analyze`
//! subcommand, which inspects a finished text without calling a model.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Tokenisation heuristics and stopword lists live here.
//! The [`pipeline`] crate sees only the port traits.

mod keywords;
mod readability;
mod style;

pub use keywords::{KeywordSettings, StatisticalKeywordExtractor};
pub use readability::{count_syllables, FleschScorer, ReadabilityReport};
pub use style::check_basic_style;
