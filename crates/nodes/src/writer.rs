//! Writer stage: expands a plan into finished prose.

use std::sync::Arc;

use pipeline::{ContentDraft, ContentPlan, LlmError, LlmProvider, ReadabilityScorer};
use tracing::{debug, instrument};

use crate::prompt;

/// Meta descriptions longer than this many characters are truncated.
const META_DESCRIPTION_LIMIT: usize = 155;

/// Characters kept before the ellipsis when truncating.
const META_DESCRIPTION_KEEP: usize = 150;

/// Sentences taken from the start of the content for the meta description.
const META_DESCRIPTION_SENTENCES: usize = 3;

/// Produces a [`ContentDraft`] from a plan and the brand guidelines.
pub struct ContentWriter {
    llm: Arc<dyn LlmProvider>,
    readability: Arc<dyn ReadabilityScorer>,
    brand_guidelines: String,
}

impl ContentWriter {
    /// `brand_guidelines` is the rendered guidelines block embedded in every
    /// writing prompt.
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        readability: Arc<dyn ReadabilityScorer>,
        brand_guidelines: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            readability,
            brand_guidelines: brand_guidelines.into(),
        }
    }

    #[instrument(skip_all, fields(request_id = %plan.request_id))]
    pub async fn write(&self, plan: &ContentPlan) -> Result<ContentDraft, LlmError> {
        let prompt = self.writing_prompt(plan);
        let response = self.llm.complete(&prompt).await?;

        let content = response.trim().to_string();
        let word_count = content.split_whitespace().count();
        let readability = self.readability.flesch_reading_ease(&content);
        debug!(word_count, readability, "draft written");

        Ok(ContentDraft {
            request_id: plan.request_id,
            title: plan.title.clone(),
            meta_description: meta_description(&content),
            tags: dedup_tags(&plan.target_keywords),
            word_count,
            readability_score: Some(readability),
            content,
        })
    }

    fn writing_prompt(&self, plan: &ContentPlan) -> String {
        let outline = plan
            .outline
            .iter()
            .enumerate()
            .map(|(i, point)| format!("{}. {point}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");
        let key_messages = plan
            .key_messages
            .iter()
            .map(|m| format!("- {m}"))
            .collect::<Vec<_>>()
            .join("\n");
        let keywords = plan.target_keywords.join(", ");
        let word_count = plan.word_count_target.to_string();

        prompt::render(
            prompt::WRITING,
            &[
                ("title", plan.title.as_str()),
                ("target_keywords", keywords.as_str()),
                ("word_count_target", word_count.as_str()),
                ("tone", plan.tone.as_str()),
                ("outline", outline.as_str()),
                ("key_messages", key_messages.as_str()),
                ("brand_guidelines", self.brand_guidelines.as_str()),
            ],
        )
    }
}

/// The first three `.`-separated segments of `content`, each
/// whitespace-collapsed, re-joined with `". "`. Segments left empty (from
/// `..` or a blank line) still count towards the three but are not joined.
/// Truncated to 150 characters plus `...` when longer than 155. `None` for
/// content with no text.
pub fn meta_description(content: &str) -> Option<String> {
    let sentences: Vec<String> = content
        .split('.')
        .take(META_DESCRIPTION_SENTENCES)
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        return None;
    }

    let meta = sentences.join(". ");
    if meta.chars().count() > META_DESCRIPTION_LIMIT {
        let kept: String = meta.chars().take(META_DESCRIPTION_KEEP).collect();
        Some(format!("{kept}..."))
    } else {
        Some(meta)
    }
}

/// Keywords with exact duplicates removed, first occurrence kept.
fn dedup_tags(keywords: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        if !tags.contains(keyword) {
            tags.push(keyword.clone());
        }
    }
    tags
}
