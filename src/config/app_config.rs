use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{ExecuteOptions, FailurePolicy, QualityLevel};
use crate::infrastructure::llm::ModelTiers;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Prompt execution settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// `raise` in tests and development, `suppress` in production
    pub failure_policy: FailurePolicy,
    pub default_level: QualityLevel,
    pub default_timeout_secs: u64,
    /// TOML prompt file loaded into the prompt store
    pub prompts_file: Option<PathBuf>,
    pub models: ModelTiers,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Suppress,
            default_level: QualityLevel::Low,
            default_timeout_secs: 8,
            prompts_file: None,
            models: ModelTiers::default(),
        }
    }
}

impl RunnerConfig {
    pub fn default_options(&self) -> ExecuteOptions {
        ExecuteOptions::new()
            .level(self.default_level)
            .timeout(Duration::from_secs(self.default_timeout_secs))
    }
}

impl AppConfig {
    /// Load from `config/default`, `config/local` and `APP__*` variables.
    ///
    /// Any invalid value is an error; nothing falls back to defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(environment())
    }

    fn load_with_env(env: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("APP")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_vars(vars: &[(&str, &str)]) -> config::Environment {
        let source = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(source))
    }

    #[test]
    fn test_load_from_env() {
        let config = AppConfig::load_with_env(env_vars(&[
            ("APP__RUNNER__FAILURE_POLICY", "raise"),
            ("APP__RUNNER__PROMPTS_FILE", "prompts.toml"),
        ]))
        .unwrap();

        assert_eq!(config.runner.failure_policy, FailurePolicy::Raise);
        assert_eq!(config.runner.prompts_file, Some(PathBuf::from("prompts.toml")));
    }

    #[test]
    fn test_load_rejects_invalid_policy() {
        let result = AppConfig::load_with_env(env_vars(&[
            ("APP__RUNNER__FAILURE_POLICY", "rasie"),
            ("APP__RUNNER__PROMPTS_FILE", "prompts.toml"),
        ]));

        let error = result.unwrap_err();
        assert!(error.to_string().contains("rasie"));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.runner.failure_policy, FailurePolicy::Suppress);
        assert_eq!(config.runner.default_timeout_secs, 8);
        assert!(config.runner.prompts_file.is_none());
    }

    #[test]
    fn test_default_options() {
        let runner = RunnerConfig {
            default_level: QualityLevel::High,
            default_timeout_secs: 3,
            ..RunnerConfig::default()
        };

        let options = runner.default_options();
        assert_eq!(options.level, QualityLevel::High);
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert!(!options.verbose);
    }

    #[test]
    fn test_deserialize_partial_runner_section() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
[logging]
level = "debug"
format = "json"

[runner]
failure_policy = "raise"
prompts_file = "prompts.toml"

[runner.models]
low = "small-model"
high = "large-model"
"#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.runner.failure_policy, FailurePolicy::Raise);
        assert_eq!(config.runner.default_timeout_secs, 8);
        assert_eq!(config.runner.prompts_file, Some(PathBuf::from("prompts.toml")));
        assert_eq!(config.runner.models.model_for(QualityLevel::High), "large-model");
    }
}
