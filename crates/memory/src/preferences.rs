//! User preferences learned from reviewer feedback.

use std::path::{Path, PathBuf};

use pipeline::{Feedback, PreferenceStore, StorageError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::file::JsonFile;

/// File name used inside the data directory.
pub const PREFERENCES_FILE_NAME: &str = "user_preferences.json";

/// Preferences that steer future content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub default_tone: String,
    pub preferred_length: String,
    pub content_types: Vec<String>,
    pub target_audiences: Vec<String>,
    pub writing_style_notes: String,
    pub favorite_topics: Vec<String>,
    pub content_goals: Vec<String>,
    /// Tones reviewers approved, in the order the approvals arrived.
    pub successful_tones: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            default_tone: "professional".to_string(),
            preferred_length: "medium".to_string(),
            content_types: Vec::new(),
            target_audiences: Vec::new(),
            writing_style_notes: String::new(),
            favorite_topics: Vec::new(),
            content_goals: Vec::new(),
            successful_tones: Vec::new(),
        }
    }
}

/// [`UserPreferences`] persisted as a JSON object.
#[derive(Debug)]
pub struct PreferencesFile {
    file: JsonFile,
    preferences: UserPreferences,
}

impl PreferencesFile {
    /// Opens the preferences at `path`, using defaults when the file is
    /// missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let file = JsonFile::new(path);
        let preferences = file.load_or(UserPreferences::default);
        info!(path = %file.path().display(), "user preferences loaded");
        Self { file, preferences }
    }

    /// Opens `PREFERENCES_FILE_NAME` inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::open(data_dir.as_ref().join(PREFERENCES_FILE_NAME))
    }

    /// Current preferences.
    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// Applies `change` and persists the result.
    pub fn update(&mut self, change: impl FnOnce(&mut UserPreferences)) -> Result<(), StorageError> {
        change(&mut self.preferences);
        self.file.save(&self.preferences)
    }
}

impl PreferenceStore for PreferencesFile {
    fn learn_from_feedback(&mut self, feedback: &Feedback) -> Result<(), StorageError> {
        if !feedback.approved {
            return Ok(());
        }
        match feedback.tone.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(tone) => {
                debug!(tone, "learning successful tone");
                let tone = tone.to_string();
                self.update(|p| p.successful_tones.push(tone))
            }
            None => Ok(()),
        }
    }
}
