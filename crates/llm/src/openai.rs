//! OpenAI-compatible chat-completions provider.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use pipeline::{LlmError, LlmProvider, ModelName};
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Error bodies longer than this are truncated before being surfaced.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: ModelName,
    pub temperature: f32,
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Settings for `api_key` and `model` with the default endpoint,
    /// temperature 0.7 and a two-minute timeout.
    pub fn new(api_key: impl Into<String>, model: ModelName) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            temperature: 0.7,
            timeout: Duration::from_secs(120),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// [`LlmProvider`] backed by `POST /chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    config: OpenAiConfig,
    http: Client,
}

impl OpenAiProvider {
    /// Builds a provider, rejecting an empty API key or base URL and
    /// out-of-range temperatures.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Configuration {
                message: "API key is required".to_string(),
            });
        }
        if config.base_url.trim().is_empty() {
            return Err(LlmError::Configuration {
                message: "base URL must not be empty".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&config.temperature) {
            return Err(LlmError::Configuration {
                message: format!("temperature {} is outside 0.0..=2.0", config.temperature),
            });
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("copydesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LlmError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    #[instrument(skip_all, fields(model = %self.config.model, prompt_chars = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: self.config.model.as_str(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
        };

        let started = Instant::now();
        let response = self
            .http
            .post(self.config.completions_url())
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| LlmError::Transport {
            message: format!("failed to read response body: {e}"),
        })?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "completion service returned an error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: truncate(&text, MAX_ERROR_BODY_CHARS),
            });
        }

        let completion = parse_completion(&text)?;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            response_chars = completion.content.len(),
            prompt_tokens = completion.prompt_tokens,
            completion_tokens = completion.completion_tokens,
            "completion received"
        );
        Ok(completion.content)
    }

    fn model_name(&self) -> &ModelName {
        &self.config.model
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[derive(Debug, PartialEq)]
struct Completion {
    content: String,
    prompt_tokens: u64,
    completion_tokens: u64,
}

fn parse_completion(body: &str) -> Result<Completion, LlmError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::MalformedResponse {
            message: e.to_string(),
        })?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(LlmError::EmptyCompletion)?;

    let (prompt_tokens, completion_tokens) = response
        .usage
        .map(|u| (u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(Completion {
        content,
        prompt_tokens,
        completion_tokens,
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
