//! Brand guidelines injected into the writer's prompt.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pipeline::StorageError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::file::JsonFile;

/// File name used inside the data directory.
pub const GUIDELINES_FILE_NAME: &str = "brand_guidelines.json";

/// Sentence- and paragraph-level style rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WritingStyle {
    pub sentence_length: String,
    pub paragraph_length: String,
    pub use_active_voice: bool,
    pub avoid_jargon: bool,
}

impl Default for WritingStyle {
    fn default() -> Self {
        Self {
            sentence_length: "Mix of short and medium sentences".to_string(),
            paragraph_length: "3-5 sentences maximum".to_string(),
            use_active_voice: true,
            avoid_jargon: true,
        }
    }
}

/// How the brand sounds and what it never says.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandGuidelines {
    pub brand_voice: String,
    /// Tone name → description (e.g. `"casual"` → `"Friendly, conversational"`).
    pub tone_guidelines: BTreeMap<String, String>,
    pub writing_style: WritingStyle,
    pub brand_values: Vec<String>,
    pub messaging_pillars: Vec<String>,
    pub do_not_use: Vec<String>,
    /// Discouraged term → preferred replacement.
    pub preferred_terms: BTreeMap<String, String>,
}

impl Default for BrandGuidelines {
    fn default() -> Self {
        let tone_guidelines = [
            ("professional", "Clear, authoritative, informative"),
            ("casual", "Friendly, conversational, approachable"),
            ("technical", "Precise, detailed, educational"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            brand_voice: "Professional, helpful, and authentic".to_string(),
            tone_guidelines,
            writing_style: WritingStyle::default(),
            brand_values: Vec::new(),
            messaging_pillars: Vec::new(),
            do_not_use: Vec::new(),
            preferred_terms: BTreeMap::new(),
        }
    }
}

impl BrandGuidelines {
    /// Formats the guidelines as the block the writer embeds in its prompt.
    pub fn render(&self) -> String {
        let style = &self.writing_style;
        let mut text = format!(
            "Brand Voice: {}\n\n\
             Writing Style:\n\
             - Sentence length: {}\n\
             - Paragraph length: {}\n\
             - Use active voice: {}\n\
             - Avoid jargon: {}",
            self.brand_voice,
            style.sentence_length,
            style.paragraph_length,
            style.use_active_voice,
            style.avoid_jargon,
        );

        if !self.brand_values.is_empty() {
            text.push_str(&format!("\nBrand Values: {}", self.brand_values.join(", ")));
        }
        if !self.do_not_use.is_empty() {
            text.push_str(&format!("\nAvoid using: {}", self.do_not_use.join(", ")));
        }
        if !self.preferred_terms.is_empty() {
            let terms: Vec<String> = self
                .preferred_terms
                .iter()
                .map(|(avoid, prefer)| format!("{prefer} (not {avoid})"))
                .collect();
            text.push_str(&format!("\nPreferred terms: {}", terms.join(", ")));
        }

        text
    }
}

/// [`BrandGuidelines`] persisted as a JSON object.
#[derive(Debug)]
pub struct GuidelinesFile {
    file: JsonFile,
    guidelines: BrandGuidelines,
}

impl GuidelinesFile {
    /// Opens the guidelines at `path`, using defaults when the file is
    /// missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let file = JsonFile::new(path);
        let guidelines = file.load_or(BrandGuidelines::default);
        info!(path = %file.path().display(), "brand guidelines loaded");
        Self { file, guidelines }
    }

    /// Opens `GUIDELINES_FILE_NAME` inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::open(data_dir.as_ref().join(GUIDELINES_FILE_NAME))
    }

    /// Current guidelines.
    pub fn guidelines(&self) -> &BrandGuidelines {
        &self.guidelines
    }

    /// Applies `change` and persists the result.
    pub fn update(&mut self, change: impl FnOnce(&mut BrandGuidelines)) -> Result<(), StorageError> {
        change(&mut self.guidelines);
        self.file.save(&self.guidelines)
    }
}
