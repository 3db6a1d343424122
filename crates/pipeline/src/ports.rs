//! Port traits implemented by infrastructure crates.
//!
//! The pipeline calls its external collaborators (completion service, keyword
//! extractor, readability scorer, session and preference stores) through the
//! traits here; `llm`, `analysis` and `memory` provide the production implementations
//! and tests substitute scripted ones.

use async_trait::async_trait;

use crate::{ContentSession, Feedback, LlmError, ModelName, RequestId, StorageError};

/// A language-model completion service: prompt in, text out.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends `prompt` as a single user message and returns the model's reply text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// The model this provider talks to, for logging.
    fn model_name(&self) -> &ModelName;
}

/// Extracts ranked keywords from free text.
pub trait KeywordExtractor: Send + Sync {
    /// Returns keywords ordered best-first. May be empty.
    fn extract_keywords(&self, text: &str) -> Vec<String>;
}

/// Scores how easy a text is to read.
pub trait ReadabilityScorer: Send + Sync {
    /// Flesch Reading Ease (higher is easier; typical prose falls in 30–80).
    fn flesch_reading_ease(&self, text: &str) -> f64;
}

/// Append-only history of completed content sessions.
///
/// Sessions are never removed or reordered. The only mutation of an existing
/// session is attaching (or replacing) its feedback.
pub trait SessionStore: Send + Sync {
    /// Appends a finished session and persists the store.
    fn append(&mut self, session: ContentSession) -> Result<(), StorageError>;

    /// Attaches `feedback` to the first session whose request id matches,
    /// stamping its receipt time, and persists the store.
    ///
    /// Returns `Ok(false)` when no session matches; nothing is written then.
    fn attach_feedback(
        &mut self,
        request_id: RequestId,
        feedback: Feedback,
    ) -> Result<bool, StorageError>;

    /// All sessions in insertion order.
    fn sessions(&self) -> &[ContentSession];

    /// The first session recorded for `request_id`, if any.
    fn find(&self, request_id: RequestId) -> Option<&ContentSession> {
        self.sessions()
            .iter()
            .find(|s| s.request_id() == request_id)
    }
}

/// Persistent user preferences that adapt to reviewer feedback.
pub trait PreferenceStore: Send + Sync {
    /// Records what `feedback` says about a successful piece of content and
    /// persists the result. Feedback that is not approved changes nothing.
    fn learn_from_feedback(&mut self, feedback: &Feedback) -> Result<(), StorageError>;
}
