//! Unsupervised keyword extraction.
//!
//! Candidates are word windows of one to three tokens taken within a sentence.
//! A window may contain stopwords in the middle but may not start or end with
//! one. Each candidate is scored by how often it occurs, how early it first
//! appears and how many words it spans; near-duplicates of a better candidate
//! are dropped.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use pipeline::KeywordExtractor;
use regex::Regex;
use tracing::debug;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

fn word_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w[\w'\-]*").expect("regex for words"))
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token.to_lowercase().as_str())
}

/// Tuning knobs for [`StatisticalKeywordExtractor`].
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordSettings {
    /// Longest candidate, in words.
    pub max_ngram: usize,
    /// Candidates whose word sets overlap a better candidate by at least this
    /// Jaccard ratio are dropped.
    pub dedup_threshold: f64,
    /// Maximum number of keywords returned.
    pub top: usize,
}

impl Default for KeywordSettings {
    fn default() -> Self {
        Self {
            max_ngram: 3,
            dedup_threshold: 0.7,
            top: 10,
        }
    }
}

/// [`KeywordExtractor`] based on n-gram frequency and position statistics.
#[derive(Debug, Clone, Default)]
pub struct StatisticalKeywordExtractor {
    settings: KeywordSettings,
}

struct Candidate {
    surface: String,
    words: BTreeSet<String>,
    frequency: usize,
    first_position: usize,
    length: usize,
}

impl Candidate {
    fn score(&self) -> f64 {
        let length_bonus = 1.0 + 0.5 * (self.length as f64 - 1.0);
        let position_weight = 1.0 / (1.0 + (1.0 + self.first_position as f64).ln());
        self.frequency as f64 * length_bonus * position_weight
    }
}

impl StatisticalKeywordExtractor {
    /// Creates an extractor with explicit settings.
    pub fn new(settings: KeywordSettings) -> Self {
        Self { settings }
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        let mut by_key: HashMap<String, Candidate> = HashMap::new();
        let mut position = 0usize;

        for sentence in text.split(['.', '!', '?', '\n', ';', ':']) {
            let tokens: Vec<&str> = word_pattern()
                .find_iter(sentence)
                .map(|m| m.as_str().trim_end_matches(['\'', '-']))
                .filter(|t| !t.is_empty())
                .collect();

            for start in 0..tokens.len() {
                for len in 1..=self.settings.max_ngram {
                    let end = start + len;
                    if end > tokens.len() {
                        break;
                    }
                    let window = &tokens[start..end];
                    if is_stopword(window[0]) || is_stopword(window[len - 1]) {
                        continue;
                    }
                    if window.iter().all(|t| t.chars().all(|c| c.is_ascii_digit())) {
                        continue;
                    }
                    let key = window
                        .iter()
                        .map(|t| t.to_lowercase())
                        .collect::<Vec<_>>()
                        .join(" ");
                    by_key
                        .entry(key)
                        .and_modify(|c| c.frequency += 1)
                        .or_insert_with(|| Candidate {
                            surface: window.join(" "),
                            words: window.iter().map(|t| t.to_lowercase()).collect(),
                            frequency: 1,
                            first_position: position + start,
                            length: len,
                        });
                }
            }
            position += tokens.len();
        }

        by_key.into_values().collect()
    }
}

impl KeywordExtractor for StatisticalKeywordExtractor {
    fn extract_keywords(&self, text: &str) -> Vec<String> {
        let mut candidates = self.candidates(text);
        candidates.sort_by(|a, b| {
            b.score()
                .total_cmp(&a.score())
                .then(a.first_position.cmp(&b.first_position))
                .then(a.surface.cmp(&b.surface))
        });

        let mut selected: Vec<Candidate> = Vec::new();
        for candidate in candidates {
            if selected.len() >= self.settings.top {
                break;
            }
            let duplicate = selected
                .iter()
                .any(|s| jaccard(&s.words, &candidate.words) >= self.settings.dedup_threshold);
            if !duplicate {
                selected.push(candidate);
            }
        }

        let keywords: Vec<String> = selected.into_iter().map(|c| c.surface).collect();
        debug!(count = keywords.len(), "extracted keywords");
        keywords
    }
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
