//! Readability formulas.
//!
//! Syllables are estimated by counting vowel groups, which is accurate enough
//! for English prose scoring and needs no dictionary.

use pipeline::ReadabilityScorer;
use serde::Serialize;
use tracing::debug;

/// Flesch Reading Ease reported for text with no words.
pub const DEFAULT_READING_EASE: f64 = 60.0;

/// [`ReadabilityScorer`] computing Flesch Reading Ease.
#[derive(Debug, Clone, Copy, Default)]
pub struct FleschScorer;

impl ReadabilityScorer for FleschScorer {
    fn flesch_reading_ease(&self, text: &str) -> f64 {
        let stats = TextStats::of(text);
        if stats.words == 0 {
            debug!("no words to score, using default reading ease");
            return DEFAULT_READING_EASE;
        }
        let score = stats.flesch_reading_ease();
        debug!(words = stats.words, sentences = stats.sentences, score, "scored readability");
        score
    }
}

/// Full readability breakdown for a text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadabilityReport {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub gunning_fog: f64,
    pub average_sentence_length: f64,
    pub syllable_count: usize,
    pub word_count: usize,
}

impl ReadabilityReport {
    /// Analyses `text`. Text without words gets moderate placeholder values.
    pub fn analyze(text: &str) -> Self {
        let stats = TextStats::of(text);
        if stats.words == 0 {
            return Self {
                flesch_reading_ease: DEFAULT_READING_EASE,
                flesch_kincaid_grade: 8.0,
                gunning_fog: 10.0,
                average_sentence_length: 15.0,
                syllable_count: 0,
                word_count: 0,
            };
        }

        Self {
            flesch_reading_ease: stats.flesch_reading_ease(),
            flesch_kincaid_grade: 0.39 * stats.words_per_sentence()
                + 11.8 * stats.syllables_per_word()
                - 15.59,
            gunning_fog: 0.4
                * (stats.words_per_sentence()
                    + 100.0 * stats.complex_words as f64 / stats.words as f64),
            average_sentence_length: stats.words_per_sentence(),
            syllable_count: stats.syllables,
            word_count: stats.words,
        }
    }
}

struct TextStats {
    words: usize,
    sentences: usize,
    syllables: usize,
    /// Words of three or more syllables.
    complex_words: usize,
}

impl TextStats {
    fn of(text: &str) -> Self {
        let sentences = text
            .split(['.', '!', '?'])
            .filter(|s| s.chars().any(char::is_alphanumeric))
            .count()
            .max(1);

        let mut words = 0;
        let mut syllables = 0;
        let mut complex_words = 0;
        for word in text.split_whitespace() {
            if !word.chars().any(char::is_alphanumeric) {
                continue;
            }
            words += 1;
            let n = count_syllables(word);
            syllables += n;
            if n >= 3 {
                complex_words += 1;
            }
        }

        Self {
            words,
            sentences,
            syllables,
            complex_words,
        }
    }

    fn words_per_sentence(&self) -> f64 {
        self.words as f64 / self.sentences as f64
    }

    fn syllables_per_word(&self) -> f64 {
        self.syllables as f64 / self.words as f64
    }

    fn flesch_reading_ease(&self) -> f64 {
        206.835 - 1.015 * self.words_per_sentence() - 84.6 * self.syllables_per_word()
    }
}

/// Estimates the syllables in one word. Always at least one.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    // Silent trailing "e" ("make"), but not "-le" ("table").
    let n = letters.len();
    if count > 1 && letters[n - 1] == 'e' && !(n >= 2 && letters[n - 2] == 'l') {
        count -= 1;
    }

    count.max(1)
}
