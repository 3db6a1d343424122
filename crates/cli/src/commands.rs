//! Subcommand arguments and their translation into domain values.

use std::path::PathBuf;

use analysis::{check_basic_style, ReadabilityReport, StatisticalKeywordExtractor};
use anyhow::Context;
use clap::Args;
use memory::{BrandGuidelines, UserPreferences};
use pipeline::{
    seo_score, ContentRequest, ContentType, Feedback, KeywordExtractor, Priority, RequestId,
    Score, Topic,
};
use serde::Serialize;

pub(crate) fn parse_content_type(value: &str) -> Result<ContentType, String> {
    value.parse::<ContentType>().map_err(|e| e.to_string())
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    value.parse::<Priority>().map_err(|e| e.to_string())
}

pub(crate) fn parse_request_id(value: &str) -> Result<RequestId, String> {
    value
        .trim()
        .parse::<RequestId>()
        .map_err(|e| format!("invalid request id '{value}': {e}"))
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// What the piece is about
    #[arg(long)]
    pub topic: String,

    /// blog_post, social_media, email_newsletter, product_description or landing_page
    #[arg(long, default_value = "blog_post", value_parser = parse_content_type)]
    pub content_type: ContentType,

    #[arg(long, default_value = "medium", value_parser = parse_priority)]
    pub priority: Priority,

    /// Who the piece is written for
    #[arg(long)]
    pub audience: Option<String>,

    /// A point the piece must make (repeatable)
    #[arg(long = "key-point")]
    pub key_points: Vec<String>,

    #[arg(long)]
    pub tone: Option<String>,

    /// short, medium or long
    #[arg(long)]
    pub length: Option<String>,

    /// An SEO keyword to target (repeatable)
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,

    #[arg(long)]
    pub deadline: Option<String>,

    #[arg(long)]
    pub brand_voice: Option<String>,

    /// Free-form background for the router and planner
    #[arg(long)]
    pub context: Option<String>,
}

impl CreateArgs {
    pub fn into_request(self) -> anyhow::Result<ContentRequest> {
        let topic = Topic::new(self.topic).context("topic must not be blank")?;
        let mut request = ContentRequest::new(topic, self.content_type);
        request.priority = self.priority;
        request.target_audience = self.audience;
        request.key_points = non_empty(self.key_points);
        request.tone = self.tone;
        request.length = self.length;
        request.seo_keywords = non_empty(self.keywords);
        request.deadline = self.deadline;
        request.brand_voice = self.brand_voice;
        request.additional_context = self.context;
        Ok(request)
    }
}

#[derive(Debug, Args)]
pub struct FeedbackArgs {
    /// Request id printed by `create`
    #[arg(value_parser = parse_request_id)]
    pub request_id: RequestId,

    /// Approve the content; without this flag the feedback is a rejection
    #[arg(long)]
    pub approve: bool,

    /// Reviewer comments
    #[arg(long)]
    pub text: Option<String>,

    /// A requested change (repeatable)
    #[arg(long = "change")]
    pub changes: Vec<String>,

    /// Rating from 1 to 5
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: Option<u8>,

    /// Tone that worked, remembered when the content is approved
    #[arg(long)]
    pub tone: Option<String>,
}

impl FeedbackArgs {
    pub fn into_feedback(self) -> Feedback {
        let mut feedback = Feedback::new(self.approve);
        feedback.feedback_text = self.text;
        feedback.suggested_changes = non_empty(self.changes);
        feedback.quality_rating = self.rating;
        feedback.tone = self.tone;
        feedback
    }
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Text file to score; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Title used for the SEO title checks
    #[arg(long, default_value = "")]
    pub title: String,

    /// Keyword for the SEO checks (repeatable); extracted from the text when omitted
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,
}

/// Local scores for a piece of text. No model call is involved.
#[derive(Debug, Serialize)]
pub struct TextAnalysis {
    pub readability: ReadabilityReport,
    pub seo_score: Score,
    pub keywords: Vec<String>,
    pub style_issues: Vec<String>,
}

pub fn analyze_text(text: &str, title: &str, keywords: Vec<String>) -> TextAnalysis {
    let keywords = match non_empty(keywords) {
        Some(given) => given,
        None => StatisticalKeywordExtractor::default().extract_keywords(text),
    };
    TextAnalysis {
        readability: ReadabilityReport::analyze(text),
        seo_score: seo_score(text, title, &keywords),
        style_issues: check_basic_style(text),
        keywords,
    }
}

#[derive(Debug, Args)]
pub struct GuidelinesArgs {
    /// Replace the brand voice
    #[arg(long)]
    pub voice: Option<String>,

    /// Add a brand value (repeatable)
    #[arg(long = "value")]
    pub values: Vec<String>,

    /// Add a term the writer must not use (repeatable)
    #[arg(long = "avoid")]
    pub avoid: Vec<String>,

    /// Print the block embedded in writing prompts instead of JSON
    #[arg(long)]
    pub render: bool,
}

impl GuidelinesArgs {
    pub fn has_changes(&self) -> bool {
        self.voice.is_some() || !self.values.is_empty() || !self.avoid.is_empty()
    }

    pub fn apply(&self, guidelines: &mut BrandGuidelines) {
        if let Some(voice) = &self.voice {
            guidelines.brand_voice = voice.clone();
        }
        push_unique(&mut guidelines.brand_values, &self.values);
        push_unique(&mut guidelines.do_not_use, &self.avoid);
    }
}

#[derive(Debug, Args)]
pub struct PreferencesArgs {
    /// Tone used when a request names none
    #[arg(long)]
    pub tone: Option<String>,

    /// Length used when a request names none
    #[arg(long)]
    pub length: Option<String>,

    /// Add a favourite topic (repeatable)
    #[arg(long = "topic")]
    pub topics: Vec<String>,

    /// Add a target audience (repeatable)
    #[arg(long = "audience")]
    pub audiences: Vec<String>,
}

impl PreferencesArgs {
    pub fn has_changes(&self) -> bool {
        self.tone.is_some()
            || self.length.is_some()
            || !self.topics.is_empty()
            || !self.audiences.is_empty()
    }

    pub fn apply(&self, preferences: &mut UserPreferences) {
        if let Some(tone) = &self.tone {
            preferences.default_tone = tone.clone();
        }
        if let Some(length) = &self.length {
            preferences.preferred_length = length.clone();
        }
        push_unique(&mut preferences.favorite_topics, &self.topics);
        push_unique(&mut preferences.target_audiences, &self.audiences);
    }
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    let items: Vec<String> = items
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    (!items.is_empty()).then_some(items)
}

fn push_unique(list: &mut Vec<String>, additions: &[String]) {
    for item in additions {
        if !list.contains(item) {
            list.push(item.clone());
        }
    }
}
