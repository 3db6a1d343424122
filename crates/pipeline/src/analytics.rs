//! Aggregate views over the content history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ContentSession, ContentType};

/// Minimum overall score for an approved session to count as successful.
pub const SUCCESS_SCORE_THRESHOLD: f64 = 80.0;

/// How many of the most recent successful sessions are considered.
pub const SUCCESS_WINDOW: usize = 10;

/// Overall performance of the pipeline across every recorded session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_content_pieces: usize,
    /// Fraction of sessions the quality checker approved, in `[0, 1]`.
    pub approval_rate: f64,
    pub average_quality_score: f64,
    /// Session count per content type.
    pub content_types: BTreeMap<ContentType, usize>,
}

impl PerformanceMetrics {
    /// Computes metrics over `sessions`. An empty history yields all zeros.
    pub fn from_sessions(sessions: &[ContentSession]) -> Self {
        if sessions.is_empty() {
            return Self::default();
        }

        let total = sessions.len();
        let approved = sessions.iter().filter(|s| s.approved).count();
        let quality_sum: f64 = sessions
            .iter()
            .map(|s| s.quality_report.overall_score.as_f64())
            .sum();

        let mut content_types = BTreeMap::new();
        for session in sessions {
            *content_types.entry(session.request.content_type).or_insert(0) += 1;
        }

        Self {
            total_content_pieces: total,
            approval_rate: approved as f64 / total as f64,
            average_quality_score: quality_sum / total as f64,
            content_types,
        }
    }
}

/// The most recent approved sessions scoring at least
/// [`SUCCESS_SCORE_THRESHOLD`], optionally restricted to one content type.
///
/// At most [`SUCCESS_WINDOW`] sessions are returned, oldest first.
pub fn successful_sessions(
    sessions: &[ContentSession],
    content_type: Option<ContentType>,
) -> Vec<&ContentSession> {
    let matching: Vec<&ContentSession> = sessions
        .iter()
        .filter(|s| s.approved && s.quality_report.overall_score.as_f64() >= SUCCESS_SCORE_THRESHOLD)
        .filter(|s| content_type.is_none_or(|ct| s.request.content_type == ct))
        .collect();
    let skip = matching.len().saturating_sub(SUCCESS_WINDOW);
    matching.into_iter().skip(skip).collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Session builders shared by tests in this crate.

    use crate::{
        ContentDraft, ContentPlan, ContentRequest, ContentSession, ContentType, QualityReport,
        Score, Topic,
    };

    pub(crate) fn session(content_type: ContentType, score: f64, approved: bool) -> ContentSession {
        let request = ContentRequest::new(Topic::new("topic").unwrap(), content_type);
        let id = request.request_id;
        let plan = ContentPlan {
            request_id: id,
            title: "t".into(),
            outline: vec![],
            target_keywords: vec![],
            word_count_target: 800,
            tone: "professional".into(),
            key_messages: vec![],
            research_notes: Default::default(),
        };
        let draft = ContentDraft {
            request_id: id,
            title: "t".into(),
            content: "body".into(),
            meta_description: None,
            tags: vec![],
            word_count: 1,
            readability_score: None,
        };
        let report = QualityReport {
            request_id: id,
            overall_score: Score::clamped(score),
            readability_score: Score::zero(),
            seo_score: Score::zero(),
            brand_voice_score: Score::zero(),
            issues: vec![],
            suggestions: vec![],
            approved,
        };
        ContentSession::new(request, plan, draft, report)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::session;
    use super::*;

    #[test]
    fn empty_history_has_zero_metrics() {
        let m = PerformanceMetrics::from_sessions(&[]);
        assert_eq!(m.total_content_pieces, 0);
        assert_eq!(m.approval_rate, 0.0);
        assert!(m.content_types.is_empty());
    }

    #[test]
    fn metrics_count_approvals_and_types() {
        let sessions = vec![
            session(ContentType::BlogPost, 90.0, true),
            session(ContentType::BlogPost, 60.0, false),
            session(ContentType::LandingPage, 75.0, true),
            session(ContentType::SocialMedia, 55.0, false),
        ];
        let m = PerformanceMetrics::from_sessions(&sessions);
        assert_eq!(m.total_content_pieces, 4);
        assert_eq!(m.approval_rate, 0.5);
        assert_eq!(m.average_quality_score, 70.0);
        assert_eq!(m.content_types[&ContentType::BlogPost], 2);
        assert_eq!(m.content_types[&ContentType::LandingPage], 1);
    }

    #[test]
    fn successful_sessions_need_approval_and_score() {
        let sessions = vec![
            session(ContentType::BlogPost, 85.0, true),
            session(ContentType::BlogPost, 95.0, false),
            session(ContentType::BlogPost, 79.9, true),
            session(ContentType::LandingPage, 80.0, true),
        ];
        assert_eq!(successful_sessions(&sessions, None).len(), 2);
        let blogs = successful_sessions(&sessions, Some(ContentType::BlogPost));
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0].quality_report.overall_score.as_f64(), 85.0);
    }

    #[test]
    fn successful_sessions_keep_the_latest_ten() {
        let sessions: Vec<_> = (0..14)
            .map(|i| session(ContentType::BlogPost, 80.0 + i as f64, true))
            .collect();
        let recent = successful_sessions(&sessions, None);
        assert_eq!(recent.len(), SUCCESS_WINDOW);
        assert_eq!(recent[0].quality_report.overall_score.as_f64(), 84.0);
        assert_eq!(recent[9].quality_report.overall_score.as_f64(), 93.0);
    }
}
