//! Prompt Runner
//!
//! Executes a named prompt against an LLM on behalf of a request handler:
//! - Prompt lookup by site, item type and name
//! - Template filling from handler context
//! - Structured LLM invocation with quality level and timeout
//! - Raise or suppress policy for execution failures

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;
pub use crate::domain::{
    DomainError, ExecuteOptions, FailurePolicy, Handler, PromptExecutor, PromptOutcome,
    PromptRunError, PromptRuntime, QualityLevel, RequestHandler,
};

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::domain::LlmClient;
use crate::infrastructure::logging;
use crate::infrastructure::prompt_store::InMemoryPromptStore;

/// Load configuration from `.env`, config files and `APP__*` variables.
///
/// Unset values take their defaults; invalid values are returned as errors.
pub fn load_config() -> Result<AppConfig, ::config::ConfigError> {
    dotenvy::dotenv().ok();
    AppConfig::load()
}

/// Install logging as configured. No-op if the host already did.
pub fn init_logging(config: &AppConfig) -> bool {
    logging::init_logging(&logging::LoggingConfig::from(&config.logging))
}

/// Build the prompt runtime described by the configuration
pub fn create_runtime(
    config: &AppConfig,
    client: Arc<dyn LlmClient>,
) -> anyhow::Result<PromptRuntime> {
    let store = match &config.runner.prompts_file {
        Some(path) => InMemoryPromptStore::from_file(path)
            .with_context(|| format!("Failed to load prompts from '{}'", path.display()))?,
        None => InMemoryPromptStore::new(),
    };

    info!(
        prompts = store.len(),
        policy = ?config.runner.failure_policy,
        "Prompt runtime configured"
    );

    let runtime = PromptRuntime::builder()
        .lookup(Arc::new(store))
        .client(client)
        .failure_policy(config.runner.failure_policy)
        .default_options(config.runner.default_options())
        .build()?;

    Ok(runtime)
}
