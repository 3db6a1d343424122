//! Closed-form scoring rules.
//!
//! Both functions here are pure: [`seo_score`] is a weighted checklist over
//! simple counts, and [`extract_score`] pulls the first number out of a line of
//! model output. Neither performs I/O.

use std::sync::OnceLock;

use regex::Regex;

use crate::Score;

/// Title length (in characters) that earns the title-length points.
const TITLE_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 30..=60;

/// Keyword density window (occurrences per word) that earns full keyword points.
const KEYWORD_DENSITY_RANGE: std::ops::RangeInclusive<f64> = 0.01..=0.03;

fn number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("regex for score numbers"))
}

fn header_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#{1,6}\s+").expect("regex for markdown headers"))
}

fn list_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A bullet at the start of a line, or a numbered marker anywhere.
    RE.get_or_init(|| Regex::new(r"(?m)^\*|\d+\.").expect("regex for list markers"))
}

/// Scores `content` for search-engine friendliness on a 0–100 scale.
///
/// | Check | Points |
/// |-------|--------|
/// | Title is 30–60 characters | 15 |
/// | Any keyword appears in the title | 5 |
/// | At least 300 words | 10 |
/// | At least 1000 words | 5 |
/// | Keyword density in 1–3% (else any mention) | 25 (15) |
/// | Has a markdown header line | 10 |
/// | Has a list marker | 10 |
/// | Meta elements (assumed present) | 20 |
pub fn seo_score(content: &str, title: &str, keywords: &[String]) -> Score {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    let mut score = 0.0;

    if TITLE_LENGTH_RANGE.contains(&title.chars().count()) {
        score += 15.0;
    }
    let title_lower = title.to_lowercase();
    if keywords.iter().any(|k| title_lower.contains(k.as_str())) {
        score += 5.0;
    }

    let word_count = content.split_whitespace().count();
    if word_count >= 300 {
        score += 10.0;
    }
    if word_count >= 1000 {
        score += 5.0;
    }

    if !keywords.is_empty() && word_count > 0 {
        let content_lower = content.to_lowercase();
        let mentions: usize = keywords
            .iter()
            .map(|k| content_lower.matches(k.as_str()).count())
            .sum();
        let density = mentions as f64 / word_count as f64;
        if KEYWORD_DENSITY_RANGE.contains(&density) {
            score += 25.0;
        } else if density > 0.0 {
            score += 15.0;
        }
    }

    if header_pattern().is_match(content) {
        score += 10.0;
    }
    if list_pattern().is_match(content) {
        score += 10.0;
    }

    score += 20.0;

    Score::clamped(score)
}

/// Extracts the first number in `text` as a [`Score`], clamped to `[0, 100]`.
///
/// Returns [`Score::FALLBACK`] when `text` holds no number.
pub fn extract_score(text: &str) -> Score {
    number_pattern()
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(Score::clamped)
        .unwrap_or(Score::FALLBACK)
}
