//! Pattern analysis over the content history.
//!
//! Looks at what reviewers approved and what the quality checker keeps
//! flagging, and turns that into hints for future requests.

use std::collections::BTreeMap;

use pipeline::{successful_sessions, ContentSession, ContentType, PerformanceMetrics};
use serde::Serialize;
use tracing::{debug, instrument};

/// Tone counted for successful sessions whose request named none.
const DEFAULT_TONE: &str = "professional";

/// Average word count at or above which longer pieces are recommended.
const LONG_FORM_WORDS: f64 = 1000.0;

/// Issues reported in [`PatternReport::common_issues`].
const COMMON_ISSUE_LIMIT: usize = 5;

/// Approval rate below which the report suggests focusing on quality.
const APPROVAL_RATE_TARGET: f64 = 0.8;

/// Average overall score below which the report suggests raising scores.
const QUALITY_SCORE_TARGET: f64 = 75.0;

/// Word-count profile of successful content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    /// `medium` or `long`.
    pub recommendation: &'static str,
}

/// What the history says about successful content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternReport {
    /// Distinct topics of successful sessions, in first-seen order.
    pub successful_topics: Vec<String>,
    pub preferred_tones: BTreeMap<String, usize>,
    pub optimal_length: LengthProfile,
    pub performance_trends: PerformanceMetrics,
    /// Most frequent quality issues across every session, most common first.
    pub common_issues: Vec<String>,
    pub improvement_suggestions: Vec<String>,
}

/// Read-only analysis over a slice of sessions.
pub struct FeedbackLoop<'a> {
    sessions: &'a [ContentSession],
}

impl<'a> FeedbackLoop<'a> {
    pub fn new(sessions: &'a [ContentSession]) -> Self {
        Self { sessions }
    }

    /// Builds a [`PatternReport`]. `content_type` narrows the successful
    /// sessions considered; issues and metrics always cover the full history.
    #[instrument(skip(self), fields(sessions = self.sessions.len()))]
    pub fn analyze_patterns(&self, content_type: Option<ContentType>) -> PatternReport {
        let successful = successful_sessions(self.sessions, content_type);
        let metrics = PerformanceMetrics::from_sessions(self.sessions);
        debug!(successful = successful.len(), "analysing successful content");

        PatternReport {
            successful_topics: successful_topics(&successful),
            preferred_tones: preferred_tones(&successful),
            optimal_length: optimal_length(&successful),
            common_issues: common_issues(self.sessions),
            improvement_suggestions: improvement_suggestions(&metrics),
            performance_trends: metrics,
        }
    }
}

fn successful_topics(sessions: &[&ContentSession]) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for session in sessions {
        let topic = session.request.topic.as_str();
        if !topics.iter().any(|t| t == topic) {
            topics.push(topic.to_string());
        }
    }
    topics
}

fn preferred_tones(sessions: &[&ContentSession]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for session in sessions {
        let tone = session.request.tone.as_deref().unwrap_or(DEFAULT_TONE);
        *counts.entry(tone.to_string()).or_insert(0) += 1;
    }
    counts
}

fn optimal_length(sessions: &[&ContentSession]) -> LengthProfile {
    let lengths: Vec<usize> = sessions.iter().map(|s| s.draft.word_count).collect();
    let (Some(&min), Some(&max)) = (lengths.iter().min(), lengths.iter().max()) else {
        return LengthProfile {
            average: None,
            min: None,
            max: None,
            recommendation: "medium",
        };
    };

    let average = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    debug!(average, min, max, "length profile");
    LengthProfile {
        average: Some(average),
        min: Some(min),
        max: Some(max),
        recommendation: if average < LONG_FORM_WORDS { "medium" } else { "long" },
    }
}

/// Ties keep the order in which issues were first reported.
fn common_issues(sessions: &[ContentSession]) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for issue in sessions.iter().flat_map(|s| &s.quality_report.issues) {
        match counts.iter_mut().find(|(seen, _)| *seen == issue.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((issue.as_str(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(COMMON_ISSUE_LIMIT)
        .map(|(issue, _)| issue.to_string())
        .collect()
}

fn improvement_suggestions(metrics: &PerformanceMetrics) -> Vec<String> {
    let mut suggestions = Vec::new();
    if metrics.approval_rate < APPROVAL_RATE_TARGET {
        suggestions.push(
            "Focus on improving content quality - approval rate is below 80%".to_string(),
        );
    }
    if metrics.average_quality_score < QUALITY_SCORE_TARGET {
        suggestions.push("Work on improving overall content quality scores".to_string());
    }
    suggestions
}
