//! Planner stage: turns a request into a title, outline and keyword set.

use std::collections::BTreeMap;
use std::sync::Arc;

use pipeline::{ContentPlan, ContentRequest, KeywordExtractor, LlmError, LlmProvider};
use tracing::{debug, instrument};

use crate::prompt::{self, digits, labelled, numbered_item, split_list};

/// Word count used when the model gives none.
pub const DEFAULT_WORD_COUNT: u32 = 800;

/// Upper bound assumed when a word-count range has no digits after the dash.
const DEFAULT_WORD_COUNT_MAX: u32 = 1000;

/// Keywords taken from the topic when the request supplies none.
const EXTRACTED_KEYWORD_LIMIT: usize = 5;

/// Prompt defaults for request fields the caller left empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerDefaults {
    pub tone: String,
    pub length: String,
    pub target_audience: String,
    pub brand_voice: String,
}

impl Default for PlannerDefaults {
    fn default() -> Self {
        Self {
            tone: "professional".to_string(),
            length: "medium".to_string(),
            target_audience: "general audience".to_string(),
            brand_voice: "authentic and helpful".to_string(),
        }
    }
}

/// The fields a planning reply can carry. Absent lines stay `None`/empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanResponse {
    pub title: Option<String>,
    pub outline: Vec<String>,
    pub target_keywords: Vec<String>,
    pub key_messages: Vec<String>,
    pub word_count_target: Option<u32>,
    pub tone_notes: Option<String>,
}

/// Produces a [`ContentPlan`] for each request.
pub struct ContentPlanner {
    llm: Arc<dyn LlmProvider>,
    keywords: Arc<dyn KeywordExtractor>,
    defaults: PlannerDefaults,
}

impl ContentPlanner {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        keywords: Arc<dyn KeywordExtractor>,
        defaults: PlannerDefaults,
    ) -> Self {
        Self {
            llm,
            keywords,
            defaults,
        }
    }

    /// Enhances the request's keywords, asks the model for a plan and
    /// assembles the result under the request's own id.
    #[instrument(skip_all, fields(request_id = %request.request_id))]
    pub async fn create_plan(&self, request: &ContentRequest) -> Result<ContentPlan, LlmError> {
        let keywords = self.enhance_keywords(request);
        debug!(keywords = ?keywords, "keywords selected");

        let prompt = self.planning_prompt(request, &keywords);
        let response = self.llm.complete(&prompt).await?;
        let parsed = parse_plan_response(&response);
        debug!(
            outline_points = parsed.outline.len(),
            has_title = parsed.title.is_some(),
            "plan reply parsed"
        );

        Ok(self.assemble(request, keywords, parsed))
    }

    /// The request's SEO keywords when it has any, otherwise the top
    /// keywords extracted from the topic.
    fn enhance_keywords(&self, request: &ContentRequest) -> Vec<String> {
        match request.seo_keywords.as_ref().filter(|k| !k.is_empty()) {
            Some(existing) => existing.clone(),
            None => self
                .keywords
                .extract_keywords(request.topic.as_str())
                .into_iter()
                .take(EXTRACTED_KEYWORD_LIMIT)
                .collect(),
        }
    }

    fn planning_prompt(&self, request: &ContentRequest, keywords: &[String]) -> String {
        let d = &self.defaults;
        let key_points = request.key_points.as_deref().unwrap_or_default().join(", ");
        let seo_keywords = keywords.join(", ");
        prompt::render(
            prompt::PLANNING,
            &[
                ("topic", request.topic.as_str()),
                ("content_type", request.content_type.as_str()),
                (
                    "target_audience",
                    request.target_audience.as_deref().unwrap_or(&d.target_audience),
                ),
                ("tone", request.tone.as_deref().unwrap_or(&d.tone)),
                ("length", request.length.as_deref().unwrap_or(&d.length)),
                ("seo_keywords", seo_keywords.as_str()),
                ("key_points", key_points.as_str()),
                (
                    "brand_voice",
                    request.brand_voice.as_deref().unwrap_or(&d.brand_voice),
                ),
            ],
        )
    }

    fn assemble(
        &self,
        request: &ContentRequest,
        keywords: Vec<String>,
        parsed: PlanResponse,
    ) -> ContentPlan {
        let tone = parsed
            .tone_notes
            .or_else(|| request.tone.clone())
            .unwrap_or_else(|| self.defaults.tone.clone());

        let mut research_notes = BTreeMap::new();
        research_notes.insert("seo_analysis".to_string(), "completed".to_string());
        if !parsed.target_keywords.is_empty() {
            research_notes.insert(
                "suggested_keywords".to_string(),
                parsed.target_keywords.join(", "),
            );
        }

        ContentPlan {
            request_id: request.request_id,
            title: parsed
                .title
                .unwrap_or_else(|| format!("Content about {}", request.topic)),
            outline: parsed.outline,
            target_keywords: keywords,
            word_count_target: parsed.word_count_target.unwrap_or(DEFAULT_WORD_COUNT),
            tone,
            key_messages: parsed.key_messages,
            research_notes,
        }
    }
}

/// Parses a planning reply.
///
/// `OUTLINE:` opens the outline; numbered lines after it become outline
/// points. The other labels are single-line fields.
pub fn parse_plan_response(response: &str) -> PlanResponse {
    let mut plan = PlanResponse::default();
    let mut in_outline = false;

    for line in response.trim().lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if let Some(title) = labelled(line, "TITLE") {
            plan.title = Some(title.to_string()).filter(|t| !t.is_empty());
        } else if labelled(line, "OUTLINE").is_some() {
            in_outline = true;
        } else if let Some(keywords) = labelled(line, "TARGET_KEYWORDS") {
            plan.target_keywords = split_list(keywords);
        } else if let Some(messages) = labelled(line, "KEY_MESSAGES") {
            plan.key_messages = split_list(messages);
        } else if let Some(count) = labelled(line, "WORD_COUNT_TARGET") {
            plan.word_count_target = Some(parse_word_count(count));
        } else if let Some(notes) = labelled(line, "TONE_NOTES") {
            plan.tone_notes = Some(notes.to_string()).filter(|t| !t.is_empty());
        } else if in_outline {
            if let Some(point) = numbered_item(line).filter(|p| !p.is_empty()) {
                plan.outline.push(point.to_string());
            }
        }
    }

    plan
}

/// `"800-1200"` → 1000 (integer mean), `"about 900"` → 900.
///
/// Either side of a range falls back to its default when it has no digits.
fn parse_word_count(value: &str) -> u32 {
    let parts: Vec<&str> = value.split(['-', '–']).collect();
    match parts.as_slice() {
        [low, high] => {
            let low = digits(low).unwrap_or(DEFAULT_WORD_COUNT);
            let high = digits(high).unwrap_or(DEFAULT_WORD_COUNT_MAX);
            ((u64::from(low) + u64::from(high)) / 2) as u32
        }
        _ => digits(value).unwrap_or(DEFAULT_WORD_COUNT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{request, FixedKeywords, ScriptedLlm};

    const REPLY: &str = "TITLE: Remote Work Without the Burnout\n\
        OUTLINE:\n\
        1. Why remote teams stall\n\
        2. Rituals that keep focus\n\
        \n\
        3. Measuring what matters\n\
        TARGET_KEYWORDS: remote work, async teams\n\
        KEY_MESSAGES: trust beats tracking, write things down\n\
        WORD_COUNT_TARGET: 800-1200\n\
        TONE_NOTES: warm but direct";

    fn planner(llm: Arc<ScriptedLlm>) -> ContentPlanner {
        ContentPlanner::new(
            llm,
            Arc::new(FixedKeywords(vec![
                "a".into(),
                "b".into(),
                "c".into(),
                "d".into(),
                "e".into(),
                "f".into(),
            ])),
            PlannerDefaults::default(),
        )
    }

    #[test]
    fn parses_every_field() {
        let p = parse_plan_response(REPLY);
        assert_eq!(p.title.as_deref(), Some("Remote Work Without the Burnout"));
        assert_eq!(
            p.outline,
            vec!["Why remote teams stall", "Rituals that keep focus", "Measuring what matters"]
        );
        assert_eq!(p.target_keywords, vec!["remote work", "async teams"]);
        assert_eq!(p.key_messages, vec!["trust beats tracking", "write things down"]);
        assert_eq!(p.word_count_target, Some(1000));
        assert_eq!(p.tone_notes.as_deref(), Some("warm but direct"));
    }

    #[test]
    fn numbered_lines_before_outline_are_ignored() {
        let p = parse_plan_response("1. stray\nOUTLINE:\n9. kept\n10. also kept");
        assert_eq!(p.outline, vec!["kept", "also kept"]);
    }

    #[test]
    fn word_count_forms() {
        assert_eq!(parse_word_count("1500"), 1500);
        assert_eq!(parse_word_count("about 650 words"), 650);
        assert_eq!(parse_word_count("plenty"), DEFAULT_WORD_COUNT);
        assert_eq!(parse_word_count("600-"), 800);
        assert_eq!(parse_word_count("-1200"), 1000);
        assert_eq!(parse_word_count("700–900"), 800);
        assert_eq!(parse_word_count("1-2-3"), 123);
    }

    #[tokio::test]
    async fn plan_uses_request_id_and_parsed_fields() {
        let llm = Arc::new(ScriptedLlm::new([REPLY]));
        let req = request("Remote work");
        let plan = planner(llm).create_plan(&req).await.unwrap();

        assert_eq!(plan.request_id, req.request_id);
        assert_eq!(plan.title, "Remote Work Without the Burnout");
        assert_eq!(plan.word_count_target, 1000);
        assert_eq!(plan.tone, "warm but direct");
        assert_eq!(plan.research_notes["seo_analysis"], "completed");
        assert_eq!(plan.research_notes["suggested_keywords"], "remote work, async teams");
    }

    #[tokio::test]
    async fn extracted_keywords_are_capped_at_five() {
        let llm = Arc::new(ScriptedLlm::new([REPLY]));
        let plan = planner(llm.clone())
            .create_plan(&request("Remote work"))
            .await
            .unwrap();
        assert_eq!(plan.target_keywords, vec!["a", "b", "c", "d", "e"]);
        assert!(llm.prompts()[0].contains("SEO Keywords: a, b, c, d, e"));
    }

    #[tokio::test]
    async fn request_keywords_win_over_extraction() {
        let llm = Arc::new(ScriptedLlm::new([REPLY]));
        let mut req = request("Remote work");
        req.seo_keywords = Some(vec!["hybrid office".into()]);
        let plan = planner(llm).create_plan(&req).await.unwrap();
        assert_eq!(plan.target_keywords, vec!["hybrid office"]);
    }

    #[tokio::test]
    async fn empty_reply_falls_back_to_defaults() {
        let llm = Arc::new(ScriptedLlm::new(["I cannot help with that."]));
        let mut req = request("Tea");
        req.tone = Some("playful".into());
        let plan = planner(llm.clone()).create_plan(&req).await.unwrap();

        assert_eq!(plan.title, "Content about Tea");
        assert!(plan.outline.is_empty());
        assert_eq!(plan.word_count_target, DEFAULT_WORD_COUNT);
        assert_eq!(plan.tone, "playful");
        assert!(!plan.research_notes.contains_key("suggested_keywords"));

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Target Audience: general audience"));
        assert!(prompt.contains("Tone: playful"));
        assert!(prompt.contains("Length: medium"));
        assert!(prompt.contains("Brand Voice: authentic and helpful"));
    }

    #[tokio::test]
    async fn tone_falls_back_to_configured_default() {
        let llm = Arc::new(ScriptedLlm::new(["TITLE: x"]));
        let planner = ContentPlanner::new(
            llm,
            Arc::new(FixedKeywords(vec![])),
            PlannerDefaults {
                tone: "casual".into(),
                ..PlannerDefaults::default()
            },
        );
        let plan = planner.create_plan(&request("Tea")).await.unwrap();
        assert_eq!(plan.tone, "casual");
    }
}
