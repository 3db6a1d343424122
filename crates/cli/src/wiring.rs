//! Builds the [`ContentPipeline`] from settings and the data directory.

use std::sync::Arc;

use analysis::{FleschScorer, StatisticalKeywordExtractor};
use async_trait::async_trait;
use llm::OpenAiProvider;
use memory::{ContentHistory, GuidelinesFile, PreferencesFile};
use nodes::{ContentPipeline, ContentPlanner, ContentRouter, ContentWriter, QualityChecker};
use pipeline::{LlmError, LlmProvider, ModelName};
use tracing::{debug, info};

use crate::config::Settings;

/// Whether the command about to run calls the language model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Required,
    /// History-only commands still work without an API key.
    Optional,
}

/// Stands in for the real provider when no API key is configured.
struct Unconfigured {
    model: ModelName,
    reason: String,
}

#[async_trait]
impl LlmProvider for Unconfigured {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Configuration {
            message: self.reason.clone(),
        })
    }

    fn model_name(&self) -> &ModelName {
        &self.model
    }
}

pub fn build_pipeline(settings: &Settings, completion: Completion) -> anyhow::Result<ContentPipeline> {
    let llm: Arc<dyn LlmProvider> = match (settings.openai_config(), completion) {
        (Ok(config), _) => Arc::new(OpenAiProvider::new(config)?),
        (Err(e), Completion::Required) => return Err(e),
        (Err(e), Completion::Optional) => {
            debug!(reason = %e, "completion provider not configured");
            Arc::new(Unconfigured {
                model: settings.model_name()?,
                reason: e.to_string(),
            })
        }
    };

    let data_dir = &settings.data_dir;
    let guidelines = GuidelinesFile::in_dir(data_dir);
    let preferences = PreferencesFile::in_dir(data_dir);
    let history = ContentHistory::in_dir(data_dir);
    let defaults = settings.planner_defaults(preferences.preferences());

    info!(
        data_dir = %data_dir.display(),
        model = %llm.model_name(),
        tone = %defaults.tone,
        length = %defaults.length,
        "pipeline assembled"
    );

    Ok(ContentPipeline::new(
        ContentRouter::new(llm.clone()),
        ContentPlanner::new(
            llm.clone(),
            Arc::new(StatisticalKeywordExtractor::default()),
            defaults,
        ),
        ContentWriter::new(
            llm.clone(),
            Arc::new(FleschScorer),
            guidelines.guidelines().render(),
        ),
        QualityChecker::new(llm),
        Box::new(history),
        Box::new(preferences),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::settings;
    use pipeline::{ContentRequest, ContentType, RequestId, Topic};

    #[test]
    fn required_completion_needs_a_key() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_pipeline(&settings(dir.path()), Completion::Required)
            .err()
            .unwrap();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn history_commands_work_without_a_key() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = build_pipeline(&settings(dir.path()), Completion::Optional).unwrap();
        assert!(pipeline.content_status(RequestId::new_random()).is_none());
        assert_eq!(pipeline.performance_metrics().total_content_pieces, 0);
    }

    #[tokio::test]
    async fn unconfigured_provider_fails_the_request_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let mut pipeline = build_pipeline(&settings(dir.path()), Completion::Optional).unwrap();
        let request = ContentRequest::new(Topic::new("Tea").unwrap(), ContentType::BlogPost);

        let outcome = pipeline.process_request(request).await;

        let error = outcome.error().unwrap();
        assert!(error.contains("router stage failed"), "{error}");
        assert!(error.contains("OPENAI_API_KEY"), "{error}");
        assert!(!dir.path().join(memory::HISTORY_FILE_NAME).exists());
    }

    #[test]
    fn configured_key_builds_the_real_provider() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = settings(dir.path());
        s.api_key = Some("sk-test".into());
        assert!(build_pipeline(&s, Completion::Required).is_ok());
    }
}
