//! Content records passed between pipeline stages.
//!
//! Every record is plain data keyed by the originating [`RequestId`]. A request
//! flows through routing, planning, writing and quality checking exactly once,
//! producing one [`ContentPlan`], one [`ContentDraft`] and one [`QualityReport`],
//! which are then bundled into a [`ContentSession`].

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ContentError, RequestId, Score, Timestamp, Topic};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// The kind of content being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Long-form article, usually with headings.
    BlogPost,
    /// A short post for a social network.
    SocialMedia,
    /// A newsletter sent to subscribers.
    EmailNewsletter,
    /// Copy for a product listing.
    ProductDescription,
    /// Conversion-focused copy for a single web page.
    LandingPage,
}

impl ContentType {
    /// All content types, in declaration order.
    pub const ALL: [ContentType; 5] = [
        ContentType::BlogPost,
        ContentType::SocialMedia,
        ContentType::EmailNewsletter,
        ContentType::ProductDescription,
        ContentType::LandingPage,
    ];

    /// Returns the wire name (e.g. `"blog_post"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::BlogPost => "blog_post",
            ContentType::SocialMedia => "social_media",
            ContentType::EmailNewsletter => "email_newsletter",
            ContentType::ProductDescription => "product_description",
            ContentType::LandingPage => "landing_page",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise_token(s);
        Self::ALL
            .into_iter()
            .find(|ct| ct.as_str() == wanted)
            .ok_or_else(|| ContentError::InvalidRequest {
                message: format!("unknown content type '{s}'"),
            })
    }
}

/// Scheduling priority attached to a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait behind everything else.
    Low,
    /// The default when a request names none.
    #[default]
    Medium,
    /// Should be picked up ahead of routine work.
    High,
    /// Has a hard deadline.
    Urgent,
}

impl Priority {
    /// Returns the wire name (e.g. `"medium"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_token(s).as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(ContentError::InvalidRequest {
                message: format!("unknown priority '{s}'"),
            }),
        }
    }
}

/// A request for one piece of content.
///
/// Only `topic` and `content_type` are required; every optional field falls
/// back to a stage-specific default when the planner builds its prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub request_id: RequestId,
    pub topic: Topic,
    pub content_type: ContentType,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub key_points: Option<Vec<String>>,
    #[serde(default)]
    pub tone: Option<String>,
    /// `short`, `medium` or `long`.
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub seo_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub brand_voice: Option<String>,
    #[serde(default)]
    pub additional_context: Option<String>,
}

impl ContentRequest {
    /// Creates a request with a fresh [`RequestId`] and no optional metadata.
    pub fn new(topic: Topic, content_type: ContentType) -> Self {
        Self {
            request_id: RequestId::new_random(),
            topic,
            content_type,
            priority: Priority::default(),
            target_audience: None,
            key_points: None,
            tone: None,
            length: None,
            seo_keywords: None,
            deadline: None,
            brand_voice: None,
            additional_context: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// How much effort the router expects a request to need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    /// A single pass of writing is enough.
    Simple,
    /// Needs a plan before writing.
    Moderate,
    /// Needs research, planning and careful review.
    Complex,
}

impl FromStr for Complexity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_token(s).as_str() {
            "simple" => Ok(Complexity::Simple),
            "moderate" => Ok(Complexity::Moderate),
            "complex" => Ok(Complexity::Complex),
            _ => Err(()),
        }
    }
}

/// Which workflow the router recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Skip straight to writing.
    DirectWrite,
    /// Plan, write and review.
    FullPipeline,
}

impl FromStr for Route {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_token(s).as_str() {
            "direct_write" => Ok(Route::DirectWrite),
            "full_pipeline" => Ok(Route::FullPipeline),
            _ => Err(()),
        }
    }
}

/// The router's assessment of a request.
///
/// Every field is optional because the model may omit any line; keys the
/// router does not recognise are kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub content_type: Option<String>,
    pub complexity: Option<Complexity>,
    #[serde(default)]
    pub tools_needed: Vec<String>,
    pub estimated_minutes: Option<u32>,
    pub route_to: Option<Route>,
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Plan, draft, report
// ---------------------------------------------------------------------------

/// The content strategy produced by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPlan {
    pub request_id: RequestId,
    pub title: String,
    pub outline: Vec<String>,
    pub target_keywords: Vec<String>,
    pub word_count_target: u32,
    pub tone: String,
    pub key_messages: Vec<String>,
    #[serde(default)]
    pub research_notes: BTreeMap<String, String>,
}

/// Prose produced by the writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDraft {
    pub request_id: RequestId,
    pub title: String,
    pub content: String,
    pub meta_description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub word_count: usize,
    pub readability_score: Option<f64>,
}

/// The quality checker's verdict on a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub request_id: RequestId,
    pub overall_score: Score,
    pub readability_score: Score,
    pub seo_score: Score,
    pub brand_voice_score: Score,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub approved: bool,
}

// ---------------------------------------------------------------------------
// Feedback and history
// ---------------------------------------------------------------------------

/// Human feedback on a finished piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub approved: bool,
    #[serde(default)]
    pub feedback_text: Option<String>,
    #[serde(default)]
    pub suggested_changes: Option<Vec<String>>,
    /// Reviewer rating, typically 1–5.
    #[serde(default)]
    pub quality_rating: Option<u8>,
    /// Tone the reviewer considered successful; learned into user preferences.
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub content_type: Option<ContentType>,
    /// Stamped by the session store when the feedback is attached.
    #[serde(default)]
    pub received_at: Option<Timestamp>,
}

impl Feedback {
    /// Creates feedback carrying only the approval verdict.
    pub fn new(approved: bool) -> Self {
        Self {
            approved,
            feedback_text: None,
            suggested_changes: None,
            quality_rating: None,
            tone: None,
            content_type: None,
            received_at: None,
        }
    }
}

/// One completed request: everything the pipeline produced plus any later feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSession {
    pub timestamp: Timestamp,
    pub request: ContentRequest,
    pub plan: ContentPlan,
    pub draft: ContentDraft,
    pub quality_report: QualityReport,
    /// The quality checker's verdict at the time the session was recorded.
    pub approved: bool,
    #[serde(default)]
    pub feedback: Option<Feedback>,
}

impl ContentSession {
    /// Bundles the records of a finished run, stamped with the current time.
    pub fn new(
        request: ContentRequest,
        plan: ContentPlan,
        draft: ContentDraft,
        quality_report: QualityReport,
    ) -> Self {
        let approved = quality_report.approved;
        Self {
            timestamp: Timestamp::now(),
            request,
            plan,
            draft,
            quality_report,
            approved,
            feedback: None,
        }
    }

    /// The request this session belongs to.
    pub fn request_id(&self) -> RequestId {
        self.request.request_id
    }
}

/// Lower-cases and trims `s`, mapping spaces and dashes to underscores so
/// `"Blog Post"`, `"blog-post"` and `"blog_post"` compare equal.
fn normalise_token(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}
