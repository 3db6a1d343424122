//! Copydesk pipeline stages and the executor that sequences them.
//!
//! Each stage is a text protocol with the language model: it renders a
//! prompt from typed records, sends it through [`pipeline::LlmProvider`], and
//! parses the free-text reply back into a typed record, falling back to
//! defaults for anything the model left out.
//!
//! | Module | Stage |
//! |--------|-------|
//! | [`router`] | Complexity and workflow assessment |
//! | [`planner`] | Title, outline, keywords and word-count target |
//! | [`writer`] | Prose, meta description and tags |
//! | [`quality`] | SEO score, model review and approval verdict |
//! | [`executor`] | [`ContentPipeline`]: sequencing, history, feedback, status |
//! | [`feedback_loop`] | Pattern analysis over the history |
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Stages sequence calls between the domain rules in
//! the [`pipeline`] crate and the port implementations supplied by the
//! composition root. They hold no I/O of their own.

pub mod executor;
pub mod feedback_loop;
pub mod planner;
mod prompt;
pub mod quality;
pub mod router;
pub mod writer;

pub use executor::{
    CompletedContent, ContentPipeline, ContentStatus, Failed, FeedbackOutcome, FeedbackReceipt,
    Outcome, PipelineOutcome, ReviewStatus, Succeeded,
};
pub use feedback_loop::{FeedbackLoop, LengthProfile, PatternReport};
pub use planner::{parse_plan_response, ContentPlanner, PlanResponse, PlannerDefaults};
pub use quality::{parse_quality_response, QualityAssessment, QualityChecker};
pub use router::{parse_routing_response, ContentRouter};
pub use writer::{meta_description, ContentWriter};

#[cfg(test)]
mod test_support;
