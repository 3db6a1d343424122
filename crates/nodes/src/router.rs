//! Router stage: asks the model how a request should be handled.

use std::sync::Arc;

use pipeline::{ContentRequest, LlmError, LlmProvider, RoutingDecision};
use tracing::{debug, instrument};

use crate::prompt::{self, digits, split_field, split_list};

/// Estimate used when the model's `ESTIMATED_TIME` line has no digits.
pub const DEFAULT_ESTIMATED_MINUTES: u32 = 30;

/// Classifies requests by complexity and recommended workflow.
pub struct ContentRouter {
    llm: Arc<dyn LlmProvider>,
}

impl ContentRouter {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Sends the routing prompt for `request` and parses the reply.
    #[instrument(skip_all, fields(request_id = %request.request_id))]
    pub async fn route(&self, request: &ContentRequest) -> Result<RoutingDecision, LlmError> {
        let prompt = routing_prompt(request);
        let response = self.llm.complete(&prompt).await?;
        let decision = parse_routing_response(&response);
        debug!(
            complexity = ?decision.complexity,
            route = ?decision.route_to,
            tools = decision.tools_needed.len(),
            "routing decision parsed"
        );
        Ok(decision)
    }
}

/// Builds the routing prompt.
pub(crate) fn routing_prompt(request: &ContentRequest) -> String {
    let mut request_text = format!("Topic: {}", request.topic);
    if let Some(audience) = present(&request.target_audience) {
        request_text.push_str(&format!("\nAudience: {audience}"));
    }
    let points: Vec<&str> = request
        .key_points
        .iter()
        .flatten()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if !points.is_empty() {
        request_text.push_str(&format!("\nKey points: {}", points.join(", ")));
    }
    if let Some(context) = present(&request.additional_context) {
        request_text.push_str(&format!("\nContext: {context}"));
    }

    prompt::render(
        prompt::ROUTING,
        &[
            ("request_text", request_text.as_str()),
            ("content_type", request.content_type.as_str()),
            ("priority", request.priority.as_str()),
        ],
    )
}

/// The trimmed value, or `None` when it is absent or blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parses `KEY: value` lines into a [`RoutingDecision`].
///
/// Lines without a colon are ignored. Keys the decision has no field for, and
/// values that do not parse into the typed fields, are kept in `extra`.
pub fn parse_routing_response(response: &str) -> RoutingDecision {
    let mut decision = RoutingDecision::default();

    for line in response.trim().lines() {
        let Some((key, value)) = split_field(line) else {
            continue;
        };
        match key.as_str() {
            "content_type" => decision.content_type = Some(value.to_string()),
            "complexity" => match value.parse() {
                Ok(complexity) => decision.complexity = Some(complexity),
                Err(()) => {
                    decision.extra.insert(key, value.to_string());
                }
            },
            "tools_needed" => decision.tools_needed = split_list(value),
            "estimated_time" => {
                decision.estimated_minutes =
                    Some(digits(value).unwrap_or(DEFAULT_ESTIMATED_MINUTES));
            }
            "route_to" => match value.parse() {
                Ok(route) => decision.route_to = Some(route),
                Err(()) => {
                    decision.extra.insert(key, value.to_string());
                }
            },
            "reasoning" => decision.reasoning = Some(value.to_string()),
            _ => {
                decision.extra.insert(key, value.to_string());
            }
        }
    }

    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{request, ScriptedLlm};
    use pipeline::{Complexity, Route};

    #[test]
    fn parses_a_complete_reply() {
        let reply = "CONTENT_TYPE: blog_post\n\
                     COMPLEXITY: Moderate\n\
                     TOOLS_NEEDED: keyword research, outline\n\
                     ESTIMATED_TIME: 45 minutes\n\
                     ROUTE_TO: full_pipeline\n\
                     REASONING: Needs research: several angles.";
        let d = parse_routing_response(reply);
        assert_eq!(d.content_type.as_deref(), Some("blog_post"));
        assert_eq!(d.complexity, Some(Complexity::Moderate));
        assert_eq!(d.tools_needed, vec!["keyword research", "outline"]);
        assert_eq!(d.estimated_minutes, Some(45));
        assert_eq!(d.route_to, Some(Route::FullPipeline));
        assert_eq!(d.reasoning.as_deref(), Some("Needs research: several angles."));
        assert!(d.extra.is_empty());
    }

    #[test]
    fn estimated_time_without_digits_defaults() {
        let d = parse_routing_response("ESTIMATED_TIME: a while");
        assert_eq!(d.estimated_minutes, Some(DEFAULT_ESTIMATED_MINUTES));
    }

    #[test]
    fn missing_lines_stay_unset() {
        let d = parse_routing_response("Sure, here is my answer.");
        assert_eq!(d, RoutingDecision::default());
    }

    #[test]
    fn unknown_keys_and_values_land_in_extra() {
        let d = parse_routing_response("Complexity: extreme\nAudience Size: large");
        assert_eq!(d.complexity, None);
        assert_eq!(d.extra["complexity"], "extreme");
        assert_eq!(d.extra["audience_size"], "large");
    }

    #[test]
    fn prompt_lists_optional_request_fields() {
        let mut req = request("Remote work");
        req.target_audience = Some("managers".into());
        req.key_points = Some(vec!["focus".into(), "trust".into()]);
        let text = routing_prompt(&req);
        assert!(text.contains("Request: Topic: Remote work\nAudience: managers\nKey points: focus, trust"));
        assert!(text.contains("Current content type: blog_post"));
        assert!(text.contains("Priority: medium"));
        assert!(!text.contains("Context:"));
    }

    #[test]
    fn blank_optional_fields_are_left_out_of_the_prompt() {
        let mut req = request("Remote work");
        req.target_audience = Some("   ".into());
        req.key_points = Some(vec!["".into(), " ".into()]);
        req.additional_context = Some(String::new());
        let text = routing_prompt(&req);
        assert!(text.contains("Request: Topic: Remote work\n"));
        assert!(!text.contains("Audience:"));
        assert!(!text.contains("Key points:"));
        assert!(!text.contains("Context:"));
    }

    #[tokio::test]
    async fn route_sends_prompt_and_parses_reply() {
        let llm = Arc::new(ScriptedLlm::new(["COMPLEXITY: simple\nROUTE_TO: direct_write"]));
        let router = ContentRouter::new(llm.clone());

        let decision = router.route(&request("Tea")).await.unwrap();

        assert_eq!(decision.complexity, Some(Complexity::Simple));
        assert_eq!(decision.route_to, Some(Route::DirectWrite));
        assert!(llm.prompts()[0].contains("Topic: Tea"));
    }

    #[tokio::test]
    async fn route_propagates_completion_errors() {
        let llm = Arc::new(ScriptedLlm::failing(LlmError::EmptyCompletion));
        let router = ContentRouter::new(llm);
        let err = router.route(&request("Tea")).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyCompletion));
    }
}
