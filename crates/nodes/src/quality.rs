//! Quality-check stage: SEO scoring plus a model review of the draft.

use std::sync::Arc;

use pipeline::{extract_score, seo_score, ContentDraft, LlmError, LlmProvider, QualityReport, Score};
use tracing::{debug, instrument};

use crate::prompt::{self, labelled};

/// The model's review of a draft. Every score defaults to [`Score::FALLBACK`].
#[derive(Debug, Clone, PartialEq)]
pub struct QualityAssessment {
    pub overall: Score,
    pub content_quality: Score,
    pub seo: Score,
    pub readability: Score,
    pub brand_voice: Score,
    pub technical_quality: Score,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub approved: bool,
}

impl Default for QualityAssessment {
    fn default() -> Self {
        Self {
            overall: Score::FALLBACK,
            content_quality: Score::FALLBACK,
            seo: Score::FALLBACK,
            readability: Score::FALLBACK,
            brand_voice: Score::FALLBACK,
            technical_quality: Score::FALLBACK,
            issues: Vec::new(),
            suggestions: Vec::new(),
            approved: false,
        }
    }
}

#[derive(Clone, Copy)]
enum Section {
    Issues,
    Suggestions,
}

/// Scores drafts and decides whether they can ship without a human edit.
pub struct QualityChecker {
    llm: Arc<dyn LlmProvider>,
}

impl QualityChecker {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Reviews `draft` against `keywords`.
    ///
    /// The SEO score is computed locally; overall and brand-voice scores and
    /// the verdict come from the model; readability is carried over from the
    /// draft (0 when the draft has none).
    #[instrument(skip_all, fields(request_id = %draft.request_id))]
    pub async fn check(
        &self,
        draft: &ContentDraft,
        keywords: &[String],
    ) -> Result<QualityReport, LlmError> {
        let seo = seo_score(&draft.content, &draft.title, keywords);
        let readability = draft.readability_score.unwrap_or(0.0);

        let word_count = draft.word_count.to_string();
        let keyword_list = keywords.join(", ");
        let readability_text = format!("{readability:.1}");
        let seo_text = seo.to_string();
        let prompt = prompt::render(
            prompt::QUALITY,
            &[
                ("title", draft.title.as_str()),
                ("word_count", word_count.as_str()),
                ("target_keywords", keyword_list.as_str()),
                ("content", draft.content.as_str()),
                ("readability_score", readability_text.as_str()),
                ("seo_score", seo_text.as_str()),
            ],
        );

        let response = self.llm.complete(&prompt).await?;
        let assessment = parse_quality_response(&response);
        debug!(
            overall = %assessment.overall,
            content_quality = %assessment.content_quality,
            technical_quality = %assessment.technical_quality,
            seo = %seo,
            approved = assessment.approved,
            issues = assessment.issues.len(),
            "quality reply parsed"
        );

        Ok(QualityReport {
            request_id: draft.request_id,
            overall_score: assessment.overall,
            readability_score: Score::clamped(readability),
            seo_score: seo,
            brand_voice_score: assessment.brand_voice,
            issues: assessment.issues,
            suggestions: assessment.suggestions,
            approved: assessment.approved,
        })
    }
}

/// Parses a quality reply.
///
/// Score lines take the first number on the line. `ISSUES:` and
/// `SUGGESTIONS:` on a line of their own open a list; `- item` lines append to
/// whichever list is open.
pub fn parse_quality_response(response: &str) -> QualityAssessment {
    let mut assessment = QualityAssessment::default();
    let mut section = None;

    for line in response.trim().lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if let Some(value) = labelled(line, "OVERALL_SCORE") {
            assessment.overall = extract_score(value);
        } else if let Some(value) = labelled(line, "Content Quality") {
            assessment.content_quality = extract_score(value);
        } else if let Some(value) = labelled(line, "SEO Optimization") {
            assessment.seo = extract_score(value);
        } else if let Some(value) = labelled(line, "Readability") {
            assessment.readability = extract_score(value);
        } else if let Some(value) = labelled(line, "Brand Voice") {
            assessment.brand_voice = extract_score(value);
        } else if let Some(value) = labelled(line, "Technical Quality") {
            assessment.technical_quality = extract_score(value);
        } else if line == "ISSUES:" {
            section = Some(Section::Issues);
        } else if line == "SUGGESTIONS:" {
            section = Some(Section::Suggestions);
        } else if let Some(value) = labelled(line, "APPROVED") {
            assessment.approved = matches!(
                value.to_ascii_uppercase().as_str(),
                "YES" | "TRUE" | "1" | "APPROVED"
            );
        } else if let (Some(active), Some(item)) = (section, line.strip_prefix("- ")) {
            let item = item.trim().to_string();
            match active {
                Section::Issues => assessment.issues.push(item),
                Section::Suggestions => assessment.suggestions.push(item),
            }
        }
    }

    assessment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{draft, ScriptedLlm};

    const REPLY: &str = "OVERALL_SCORE: 86/100\n\
        \n\
        SCORES:\n\
        Content Quality: 90\n\
        SEO Optimization: 70\n\
        Readability: 88.5\n\
        Brand Voice: 140\n\
        Technical Quality: n/a\n\
        \n\
        ISSUES:\n\
        - Intro is long\n\
        - Missing sources\n\
        \n\
        SUGGESTIONS:\n\
        - Trim the intro\n\
        \n\
        APPROVED: yes";

    #[test]
    fn parses_scores_lists_and_verdict() {
        let a = parse_quality_response(REPLY);
        assert_eq!(a.overall.as_f64(), 86.0);
        assert_eq!(a.content_quality.as_f64(), 90.0);
        assert_eq!(a.seo.as_f64(), 70.0);
        assert_eq!(a.readability.as_f64(), 88.5);
        assert_eq!(a.brand_voice.as_f64(), 100.0);
        assert_eq!(a.technical_quality, Score::FALLBACK);
        assert_eq!(a.issues, vec!["Intro is long", "Missing sources"]);
        assert_eq!(a.suggestions, vec!["Trim the intro"]);
        assert!(a.approved);
    }

    #[test]
    fn empty_reply_uses_defaults() {
        assert_eq!(parse_quality_response(""), QualityAssessment::default());
    }

    #[test]
    fn approval_needs_an_affirmative_word() {
        for (text, expected) in [
            ("APPROVED: TRUE", true),
            ("APPROVED: 1", true),
            ("APPROVED: approved", true),
            ("APPROVED: NO", false),
            ("APPROVED: yes, with edits", false),
        ] {
            assert_eq!(parse_quality_response(text).approved, expected, "{text}");
        }
    }

    #[test]
    fn bullets_outside_a_section_are_ignored() {
        let a = parse_quality_response("- stray\nISSUES: see below\n- still stray");
        assert!(a.issues.is_empty());
        assert!(a.suggestions.is_empty());
    }

    #[tokio::test]
    async fn report_mixes_local_and_model_scores() {
        let llm = Arc::new(ScriptedLlm::new([REPLY]));
        let checker = QualityChecker::new(llm.clone());
        let mut d = draft("Tea");
        d.readability_score = Some(72.3);

        let keywords = vec!["tea".to_string()];
        let report = checker.check(&d, &keywords).await.unwrap();

        assert_eq!(report.request_id, d.request_id);
        assert_eq!(report.overall_score.as_f64(), 86.0);
        assert_eq!(report.readability_score.as_f64(), 72.3);
        assert_eq!(report.seo_score, seo_score(&d.content, &d.title, &keywords));
        assert_eq!(report.brand_voice_score.as_f64(), 100.0);
        assert!(report.approved);

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Target Keywords: tea"));
        assert!(prompt.contains(&format!("- SEO Score: {}", report.seo_score)));
        assert!(prompt.contains("- Readability Score: 72.3"));
    }

    #[tokio::test]
    async fn missing_readability_reports_zero() {
        let llm = Arc::new(ScriptedLlm::new(["APPROVED: no"]));
        let mut d = draft("Tea");
        d.readability_score = None;
        let report = QualityChecker::new(llm).check(&d, &[]).await.unwrap();
        assert_eq!(report.readability_score, Score::zero());
        assert_eq!(report.overall_score, Score::FALLBACK);
        assert!(!report.approved);
    }
}
