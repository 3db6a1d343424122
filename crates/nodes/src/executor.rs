//! The content pipeline: runs a request through every stage and keeps the
//! history up to date.
//!
//! ```text
//! request → router → planner → writer → quality checker → session store
//! ```
//!
//! Stages run strictly in sequence, each awaiting the previous one. The first
//! failure aborts the run; nothing is written to the history for a failed
//! run, and the caller receives a [`Failed`] payload instead of an error.

use std::time::Instant;

use pipeline::{
    ContentDraft, ContentError, ContentPlan, ContentRequest, ContentSession, ContentType,
    Feedback, PerformanceMetrics, PreferenceStore, QualityReport, RequestId, RoutingDecision,
    Score, SessionStore, Timestamp,
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::feedback_loop::{FeedbackLoop, PatternReport};
use crate::planner::ContentPlanner;
use crate::quality::QualityChecker;
use crate::router::ContentRouter;
use crate::writer::ContentWriter;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of a pipeline operation as reported to callers.
///
/// Both variants serialise flat, with a boolean `success` field, a timestamp
/// and the processing time in seconds.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Succeeded(Succeeded<T>),
    Failed(Failed),
}

#[derive(Debug, Clone, Serialize)]
pub struct Succeeded<T> {
    success: bool,
    #[serde(flatten)]
    pub value: T,
    pub timestamp: Timestamp,
    pub processing_time: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Failed {
    success: bool,
    pub error: String,
    pub timestamp: Timestamp,
    pub processing_time: f64,
}

impl<T> Outcome<T> {
    fn finish(result: Result<T, ContentError>, started: Instant) -> Self {
        let processing_time = started.elapsed().as_secs_f64();
        let timestamp = Timestamp::now();
        match result {
            Ok(value) => Outcome::Succeeded(Succeeded {
                success: true,
                value,
                timestamp,
                processing_time,
            }),
            Err(e) => Outcome::Failed(Failed {
                success: false,
                error: e.to_string(),
                timestamp,
                processing_time,
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Succeeded(s) => Some(&s.value),
            Outcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Succeeded(_) => None,
            Outcome::Failed(f) => Some(&f.error),
        }
    }
}

/// Everything one successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedContent {
    pub request_id: RequestId,
    pub routing_decision: RoutingDecision,
    pub plan: ContentPlan,
    pub draft: ContentDraft,
    pub quality_report: QualityReport,
    /// Set when the quality checker did not approve the draft.
    pub requires_human_review: bool,
}

/// Acknowledgement of recorded feedback.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReceipt {
    pub request_id: RequestId,
    pub message: String,
}

pub type PipelineOutcome = Outcome<CompletedContent>;
pub type FeedbackOutcome = Outcome<FeedbackReceipt>;

/// Where a piece of content stands in review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Approved,
    NeedsRevision,
    PendingReview,
}

impl ReviewStatus {
    /// Reviewer feedback decides when present; otherwise the quality
    /// checker's verdict does.
    pub fn of(session: &ContentSession) -> Self {
        match &session.feedback {
            Some(f) if f.approved => ReviewStatus::Approved,
            Some(_) => ReviewStatus::NeedsRevision,
            None if session.approved => ReviewStatus::Approved,
            None => ReviewStatus::PendingReview,
        }
    }
}

/// Review state of one recorded request.
#[derive(Debug, Clone, Serialize)]
pub struct ContentStatus {
    pub request_id: RequestId,
    pub status: ReviewStatus,
    pub quality_score: Score,
    pub feedback: Option<Feedback>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Drives requests through the four stages and records the results.
pub struct ContentPipeline {
    router: ContentRouter,
    planner: ContentPlanner,
    writer: ContentWriter,
    checker: QualityChecker,
    sessions: Box<dyn SessionStore>,
    preferences: Box<dyn PreferenceStore>,
}

impl ContentPipeline {
    pub fn new(
        router: ContentRouter,
        planner: ContentPlanner,
        writer: ContentWriter,
        checker: QualityChecker,
        sessions: Box<dyn SessionStore>,
        preferences: Box<dyn PreferenceStore>,
    ) -> Self {
        Self {
            router,
            planner,
            writer,
            checker,
            sessions,
            preferences,
        }
    }

    /// Runs `request` through every stage and appends the session to the
    /// history. Failures come back as [`Outcome::Failed`].
    #[instrument(skip_all, fields(request_id = %request.request_id, topic = %request.topic))]
    pub async fn process_request(&mut self, request: ContentRequest) -> PipelineOutcome {
        let started = Instant::now();
        info!(content_type = %request.content_type, "processing content request");

        let result = self.run(request).await;
        match &result {
            Ok(done) => info!(
                elapsed_ms = elapsed_ms(started),
                score = %done.quality_report.overall_score,
                approved = done.quality_report.approved,
                "content request completed"
            ),
            Err(e) => error!(elapsed_ms = elapsed_ms(started), error = %e, "content request failed"),
        }
        Outcome::finish(result, started)
    }

    async fn run(&mut self, request: ContentRequest) -> Result<CompletedContent, ContentError> {
        let step = Instant::now();
        let routing_decision = self
            .router
            .route(&request)
            .await
            .map_err(|e| ContentError::stage("router", e))?;
        info!(step = "routing", elapsed_ms = elapsed_ms(step), route = ?routing_decision.route_to, "step finished");

        let step = Instant::now();
        let plan = self
            .planner
            .create_plan(&request)
            .await
            .map_err(|e| ContentError::stage("planner", e))?;
        info!(step = "planning", elapsed_ms = elapsed_ms(step), title = %plan.title, "step finished");

        let step = Instant::now();
        let draft = self
            .writer
            .write(&plan)
            .await
            .map_err(|e| ContentError::stage("writer", e))?;
        info!(step = "writing", elapsed_ms = elapsed_ms(step), words = draft.word_count, "step finished");

        let step = Instant::now();
        let quality_report = self
            .checker
            .check(&draft, &plan.target_keywords)
            .await
            .map_err(|e| ContentError::stage("quality", e))?;
        info!(step = "quality", elapsed_ms = elapsed_ms(step), score = %quality_report.overall_score, "step finished");

        let request_id = request.request_id;
        let session = ContentSession::new(
            request,
            plan.clone(),
            draft.clone(),
            quality_report.clone(),
        );
        self.sessions.append(session)?;

        Ok(CompletedContent {
            request_id,
            routing_decision,
            plan,
            draft,
            requires_human_review: !quality_report.approved,
            quality_report,
        })
    }

    /// Attaches reviewer feedback to a recorded request. Approved feedback is
    /// also learned into the user preferences.
    #[instrument(skip_all, fields(%request_id, approved = feedback.approved))]
    pub fn process_feedback(&mut self, request_id: RequestId, feedback: Feedback) -> FeedbackOutcome {
        let started = Instant::now();
        let result = self.record_feedback(request_id, feedback);
        if let Err(e) = &result {
            warn!(error = %e, "feedback not recorded");
        }
        Outcome::finish(result, started)
    }

    fn record_feedback(
        &mut self,
        request_id: RequestId,
        mut feedback: Feedback,
    ) -> Result<FeedbackReceipt, ContentError> {
        let Some(session) = self.sessions.find(request_id) else {
            return Err(ContentError::SessionNotFound { request_id });
        };
        if feedback.content_type.is_none() {
            feedback.content_type = Some(session.request.content_type);
        }

        // Preferences first: a failed save must leave the session without feedback.
        if feedback.approved {
            self.preferences.learn_from_feedback(&feedback)?;
        }
        if !self.sessions.attach_feedback(request_id, feedback)? {
            return Err(ContentError::SessionNotFound { request_id });
        }

        info!("feedback recorded");
        Ok(FeedbackReceipt {
            request_id,
            message: "Feedback processed successfully".to_string(),
        })
    }

    /// Review state of `request_id`, or `None` when it was never recorded.
    pub fn content_status(&self, request_id: RequestId) -> Option<ContentStatus> {
        let session = self.sessions.find(request_id)?;
        Some(ContentStatus {
            request_id,
            status: ReviewStatus::of(session),
            quality_score: session.quality_report.overall_score,
            feedback: session.feedback.clone(),
            created_at: session.timestamp,
        })
    }

    /// Aggregate metrics over the whole history.
    pub fn performance_metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics::from_sessions(self.sessions.sessions())
    }

    /// Pattern analysis over the history, see [`FeedbackLoop`].
    pub fn pattern_report(&self, content_type: Option<ContentType>) -> PatternReport {
        FeedbackLoop::new(self.sessions.sessions()).analyze_patterns(content_type)
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    since.elapsed().as_millis() as u64
}
