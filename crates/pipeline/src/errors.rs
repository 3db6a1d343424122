//! Error types for the content domain.
//!
//! [`ContentError`] covers every condition that aborts a request or a feedback
//! submission. Port-level errors ([`LlmError`] from the completion service,
//! [`StorageError`] from the flat-file stores) are defined here too so that
//! adapter crates can produce them without depending on each other.
//!
//! There is no retry policy: any stage failure aborts the whole request and is
//! reported once, by the pipeline executor, as a failure payload.

use thiserror::Error;

use crate::RequestId;

// ---------------------------------------------------------------------------
// Completion-service errors
// ---------------------------------------------------------------------------

/// Failures talking to a language-model completion service.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The request never produced an HTTP response (DNS, TLS, connection reset, timeout).
    #[error("Completion request failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The service answered with a non-success status.
    #[error("Completion service returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body (possibly truncated).
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Malformed completion response: {message}")]
    MalformedResponse {
        /// Description of the decoding problem.
        message: String,
    },

    /// The service answered successfully but produced no text.
    #[error("Completion service returned no content")]
    EmptyCompletion,

    /// The provider was constructed with unusable settings.
    #[error("Invalid completion provider configuration: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Storage errors
// ---------------------------------------------------------------------------

/// Failures reading or writing a flat-file record store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store file or its directory could not be read or written.
    #[error("I/O error on '{path}': {message}")]
    Io {
        /// File the operation targeted.
        path: String,
        /// Underlying error description.
        message: String,
    },

    /// The store contents could not be encoded or decoded as JSON.
    #[error("Serialisation error on '{path}': {message}")]
    Serialization {
        /// File the operation targeted.
        path: String,
        /// Underlying error description.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Pipeline-level errors
// ---------------------------------------------------------------------------

/// Errors that abort a content request or a feedback submission.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The caller supplied a request that cannot be processed.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of what is wrong with the request.
        message: String,
    },

    /// A stage's call to the completion service failed.
    #[error("{stage} stage failed: {source}")]
    Stage {
        /// Name of the stage that was running (`"router"`, `"planner"`, ...).
        stage: &'static str,
        /// The underlying completion failure.
        #[source]
        source: LlmError,
    },

    /// A record store could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No history session exists for the given request.
    #[error("No content session found for request {request_id}")]
    SessionNotFound {
        /// The request id that was looked up.
        request_id: RequestId,
    },
}

impl ContentError {
    /// Wraps a completion failure with the name of the stage that hit it.
    pub fn stage(stage: &'static str, source: LlmError) -> Self {
        ContentError::Stage { stage, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_error_names_the_stage() {
        let err = ContentError::stage("planner", LlmError::EmptyCompletion);
        assert_eq!(
            err.to_string(),
            "planner stage failed: Completion service returned no content"
        );
    }

    #[test]
    fn storage_error_is_transparent() {
        let err: ContentError = StorageError::Io {
            path: "data/content_history.json".into(),
            message: "permission denied".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "I/O error on 'data/content_history.json': permission denied"
        );
    }
}
