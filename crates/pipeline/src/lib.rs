//! Core content domain for Copydesk.
//!
//! This crate contains every record, newtype identifier, scoring rule and error
//! type used throughout the content pipeline. Infrastructure crates implement
//! the traits defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`RequestId`, `Topic`, `ModelName`) |
//! | [`types`] | Shared value types (`Score`, `Timestamp`) |
//! | [`models`] | Request, plan, draft, report, feedback and session records |
//! | [`ports`] | Traits for the completion service, text analysis and storage |
//! | [`scoring`] | Closed-form SEO scoring and score extraction |
//! | [`analytics`] | Performance metrics and successful-content selection |
//! | [`errors`] | Pipeline, completion and storage error types |

pub mod analytics;
pub mod errors;
pub mod identifiers;
pub mod models;
pub mod ports;
pub mod scoring;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use analytics::{successful_sessions, PerformanceMetrics};
pub use errors::{ContentError, LlmError, StorageError};
pub use identifiers::{ModelName, RequestId, Topic};
pub use models::{
    Complexity, ContentDraft, ContentPlan, ContentRequest, ContentSession, ContentType, Feedback,
    Priority, QualityReport, Route, RoutingDecision,
};
pub use ports::{
    KeywordExtractor, LlmProvider, PreferenceStore, ReadabilityScorer, SessionStore,
};
pub use scoring::{extract_score, seo_score};
pub use types::{Score, Timestamp};
