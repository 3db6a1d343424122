//! Copydesk flat-file stores.
//!
//! Implements the storage ports of the [`pipeline`] crate with one JSON file
//! per record type inside a data directory:
//!
//! | Store | File | Port |
//! |-------|------|------|
//! | [`ContentHistory`] | `content_history.json` | [`pipeline::SessionStore`] |
//! | [`PreferencesFile`] | `user_preferences.json` | [`pipeline::PreferenceStore`] |
//! | [`GuidelinesFile`] | `brand_guidelines.json` | none, read by the composition root |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Every store is loaded whole on open and rewritten whole
//! on every mutation. There is no indexing and no locking.

mod file;
mod guidelines;
mod history;
mod preferences;

pub use guidelines::{BrandGuidelines, GuidelinesFile, WritingStyle, GUIDELINES_FILE_NAME};
pub use history::{ContentHistory, HISTORY_FILE_NAME};
pub use preferences::{PreferencesFile, UserPreferences, PREFERENCES_FILE_NAME};
