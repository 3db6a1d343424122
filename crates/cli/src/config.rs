//! Runtime settings.
//!
//! Every setting can come from a command-line flag or an environment
//! variable; a flag wins when both are present. Settings are global, so they
//! may appear before or after the subcommand.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context};
use clap::{Args, ValueEnum};
use llm::{OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use memory::UserPreferences;
use nodes::PlannerDefaults;
use pipeline::ModelName;

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// API key for the chat-completions service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Model used by every stage
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Sampling temperature, 0.0 to 2.0
    #[arg(long, env = "OPENAI_TEMPERATURE", default_value_t = 0.7, global = true)]
    pub temperature: f32,

    /// Per-completion timeout in seconds
    #[arg(long, env = "COPYDESK_REQUEST_TIMEOUT_SECS", default_value_t = 120, global = true)]
    pub timeout_secs: u64,

    /// Directory holding the history, preferences and guidelines files
    #[arg(long, env = "COPYDESK_DATA_DIR", default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Tone for requests that name none (defaults to the stored preference)
    #[arg(long, env = "COPYDESK_DEFAULT_TONE", global = true)]
    pub default_tone: Option<String>,

    /// Length for requests that name none (defaults to the stored preference)
    #[arg(long, env = "COPYDESK_DEFAULT_LENGTH", global = true)]
    pub default_length: Option<String>,

    /// Log filter directives, e.g. `info` or `nodes=debug,info`
    #[arg(long = "log", env = "COPYDESK_LOG", default_value = "info", global = true)]
    pub log_filter: String,

    #[arg(long, env = "COPYDESK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

impl Settings {
    /// The configured model name.
    pub fn model_name(&self) -> anyhow::Result<ModelName> {
        ModelName::new(self.model.as_str()).context("model name must not be blank")
    }

    /// Provider settings. Fails when no API key is configured.
    pub fn openai_config(&self) -> anyhow::Result<OpenAiConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .context("OPENAI_API_KEY is not set")?;
        ensure!(self.timeout_secs > 0, "request timeout must be at least one second");

        let mut config = OpenAiConfig::new(api_key, self.model_name()?);
        config.base_url = self.base_url.clone();
        config.temperature = self.temperature;
        config.timeout = Duration::from_secs(self.timeout_secs);
        Ok(config)
    }

    /// Planner defaults: explicit settings first, then the stored preferences.
    pub fn planner_defaults(&self, preferences: &UserPreferences) -> PlannerDefaults {
        PlannerDefaults {
            tone: self
                .default_tone
                .clone()
                .unwrap_or_else(|| preferences.default_tone.clone()),
            length: self
                .default_length
                .clone()
                .unwrap_or_else(|| preferences.preferred_length.clone()),
            ..PlannerDefaults::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use clap::Parser;

    pub(crate) fn settings(data_dir: impl Into<PathBuf>) -> Settings {
        Settings {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            timeout_secs: 120,
            data_dir: data_dir.into(),
            default_tone: None,
            default_length: None,
            log_filter: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        settings: Settings,
    }

    #[test]
    fn flags_override_everything() {
        let parsed = Harness::try_parse_from([
            "copydesk",
            "--api-key",
            "sk-flag",
            "--model",
            "gpt-4o-mini",
            "--temperature",
            "0.2",
            "--data-dir",
            "/tmp/copydesk",
            "--log-format",
            "json",
        ])
        .unwrap();
        let s = parsed.settings;
        assert_eq!(s.api_key.as_deref(), Some("sk-flag"));
        assert_eq!(s.model, "gpt-4o-mini");
        assert_eq!(s.temperature, 0.2);
        assert_eq!(s.data_dir, PathBuf::from("/tmp/copydesk"));
        assert_eq!(s.log_format, LogFormat::Json);
    }

    #[test]
    fn openai_config_carries_settings() {
        let mut s = settings("data");
        s.api_key = Some(" sk-test ".into());
        s.base_url = "http://localhost:8080/v1".into();
        s.timeout_secs = 5;
        let config = s.openai_config().unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.model.as_str(), "gpt-4");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_key_blank_model_and_zero_timeout_are_rejected() {
        let s = settings("data");
        assert!(s.openai_config().unwrap_err().to_string().contains("OPENAI_API_KEY"));

        let mut s = settings("data");
        s.api_key = Some("sk".into());
        s.model = "  ".into();
        assert!(s.openai_config().is_err());

        let mut s = settings("data");
        s.api_key = Some("sk".into());
        s.timeout_secs = 0;
        assert!(s.openai_config().is_err());
    }

    #[test]
    fn planner_defaults_prefer_settings_over_preferences() {
        let mut prefs = UserPreferences::default();
        prefs.default_tone = "casual".into();
        prefs.preferred_length = "long".into();

        let mut s = settings("data");
        let d = s.planner_defaults(&prefs);
        assert_eq!((d.tone.as_str(), d.length.as_str()), ("casual", "long"));

        s.default_tone = Some("formal".into());
        let d = s.planner_defaults(&prefs);
        assert_eq!((d.tone.as_str(), d.length.as_str()), ("formal", "long"));
        assert_eq!(d.target_audience, "general audience");
    }
}
