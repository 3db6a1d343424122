//! Mechanical style checks that need no model.

use std::sync::OnceLock;

use regex::Regex;

const MAX_SENTENCE_WORDS: usize = 25;
const MAX_PARAGRAPH_WORDS: usize = 150;

fn repeated_spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("regex for repeated spaces"))
}

fn repeated_punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]{2,}").expect("regex for repeated punctuation"))
}

fn sentence_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("regex for sentence breaks"))
}

/// Returns one human-readable issue per failed check; empty when the text is clean.
pub fn check_basic_style(text: &str) -> Vec<String> {
    let mut issues = Vec::new();

    if repeated_spaces().is_match(text) {
        issues.push("Multiple consecutive spaces found".to_string());
    }
    if repeated_punctuation().is_match(text) {
        issues.push("Multiple consecutive punctuation marks".to_string());
    }

    let long_sentences = sentence_break()
        .split(text)
        .filter(|s| s.split_whitespace().count() > MAX_SENTENCE_WORDS)
        .count();
    if long_sentences > 0 {
        issues.push(format!(
            "Found {long_sentences} sentences over {MAX_SENTENCE_WORDS} words"
        ));
    }

    let long_paragraphs = text
        .split("\n\n")
        .filter(|p| p.split_whitespace().count() > MAX_PARAGRAPH_WORDS)
        .count();
    if long_paragraphs > 0 {
        issues.push(format!(
            "Found {long_paragraphs} paragraphs over {MAX_PARAGRAPH_WORDS} words"
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_has_no_issues() {
        let text = "Short sentence here.\n\nAnother paragraph follows. It is brief!";
        assert!(check_basic_style(text).is_empty());
    }

    #[test]
    fn spacing_and_punctuation_are_flagged() {
        let issues = check_basic_style("Wait  for it... Really?!");
        assert!(issues.contains(&"Multiple consecutive spaces found".to_string()));
        assert!(issues.contains(&"Multiple consecutive punctuation marks".to_string()));
    }

    #[test]
    fn long_sentences_are_counted() {
        let long = vec!["word"; 30].join(" ");
        let text = format!("{long}. Short one. {long}.");
        let issues = check_basic_style(&text);
        assert_eq!(issues, vec!["Found 2 sentences over 25 words".to_string()]);
    }

    #[test]
    fn long_paragraphs_are_counted() {
        let sentence = "This sentence has exactly eight words in it.";
        let paragraph = vec![sentence; 20].join(" ");
        let issues = check_basic_style(&paragraph);
        assert_eq!(issues, vec!["Found 1 paragraphs over 150 words".to_string()]);
    }
}
