//! Prompt executor - lookup, fill, invoke and failure policy for one handler

use std::error::Error as _;

use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use super::{
    ExecuteOptions, ExecutionFailure, FailurePolicy, PromptOutcome, PromptRunError, PromptRuntime,
};
use crate::domain::llm::LlmRequest;
use crate::domain::prompt::{PromptDefinition, PromptKey};
use crate::domain::{DomainError, Handler};

/// Runs named prompts on behalf of one handler.
///
/// The executor borrows the handler and the runtime and keeps no state
/// between calls, so any number of executions may run concurrently.
pub struct PromptExecutor<'a> {
    handler: &'a dyn Handler,
    runtime: &'a PromptRuntime,
}

impl<'a> std::fmt::Debug for PromptExecutor<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptExecutor")
            .field("site", &self.handler.site())
            .field("item_type", &self.handler.item_type())
            .finish()
    }
}

impl<'a> PromptExecutor<'a> {
    pub fn new(handler: &'a dyn Handler, runtime: &'a PromptRuntime) -> Self {
        debug!(site = %handler.site(), "Prompt executor bound to handler");
        Self { handler, runtime }
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler
    }

    /// Find the prompt definition for the handler's site and item type
    pub fn resolve(&self, prompt_name: &str) -> Result<Option<PromptDefinition>, DomainError> {
        if prompt_name.trim().is_empty() {
            return Err(DomainError::validation("Prompt name cannot be empty"));
        }

        let site = self.handler.site();
        let item_type = self.handler.item_type();
        debug!(prompt = %prompt_name, %site, %item_type, "Looking up prompt");

        let key = PromptKey::new(site, item_type, prompt_name);

        match self.runtime.lookup().find(&key)? {
            Some(definition) => {
                debug!(
                    prompt = %prompt_name,
                    length = definition.template().content().len(),
                    "Found prompt"
                );
                Ok(Some(definition))
            }
            None => {
                warn!(prompt = %prompt_name, %site, %item_type, "Prompt not found");
                Ok(None)
            }
        }
    }

    /// Run a prompt and apply the runtime's failure policy.
    ///
    /// `Ok(None)` covers a missing prompt, a model without an answer and a
    /// suppressed failure alike; use [`PromptExecutor::run`] to tell them apart.
    pub async fn execute(
        &self,
        prompt_name: &str,
        options: ExecuteOptions,
    ) -> Result<Option<Value>, PromptRunError> {
        match self.run(prompt_name, options).await {
            PromptOutcome::Answered(value) => Ok(Some(value)),
            PromptOutcome::NotFound | PromptOutcome::NoAnswer => Ok(None),
            PromptOutcome::Failed(failure) => match self.runtime.failure_policy() {
                FailurePolicy::Raise => Err(failure.into()),
                FailurePolicy::Suppress => {
                    eprintln!(
                        "ERROR running prompt '{}': {}: {}",
                        failure.prompt_name,
                        failure.kind(),
                        failure.error
                    );
                    Ok(None)
                }
            },
        }
    }

    /// Run a prompt and report exactly what happened. Never applies the
    /// failure policy.
    pub async fn run(&self, prompt_name: &str, options: ExecuteOptions) -> PromptOutcome {
        info!(
            prompt = %prompt_name,
            level = %options.level,
            timeout_ms = options.timeout.as_millis() as u64,
            "Running prompt"
        );

        match self.try_run(prompt_name, options).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let failure = ExecutionFailure::new(prompt_name, err);
                log_failure(&failure);
                PromptOutcome::Failed(failure)
            }
        }
    }

    async fn try_run(
        &self,
        prompt_name: &str,
        options: ExecuteOptions,
    ) -> Result<PromptOutcome, DomainError> {
        let Some(definition) = self.resolve(prompt_name)? else {
            if options.verbose {
                println!("Prompt {} not found", prompt_name);
            }
            debug!(prompt = %prompt_name, "Cannot run prompt - prompt not found");
            return Ok(PromptOutcome::NotFound);
        };

        let prompt = self
            .runtime
            .filler()
            .fill(definition.template(), self.handler)?;
        if options.verbose {
            println!("Prompt: {}", prompt);
        }
        debug!(prompt = %prompt_name, length = prompt.len(), "Filled prompt");

        let (_, answer_structure) = definition.into_parts();
        let request = LlmRequest {
            prompt,
            answer_structure,
            level: options.level,
            timeout: options.timeout,
            query_params: self.handler.query_params().clone(),
        };

        info!(prompt = %prompt_name, level = %options.level, "Calling LLM");

        // Expiry drops the pending call
        let response = match timeout(options.timeout, self.runtime.client().ask(request)).await {
            Ok(result) => result?,
            Err(_) => return Err(DomainError::timeout(options.timeout)),
        };

        let outcome = match response {
            Some(value) => {
                info!(prompt = %prompt_name, "LLM response received");
                debug!(
                    prompt = %prompt_name,
                    response_type = json_type_name(&value),
                    size = value.to_string().len(),
                    "Response details"
                );
                if options.verbose {
                    println!("Response: {}", value);
                }
                PromptOutcome::Answered(value)
            }
            None => {
                warn!(prompt = %prompt_name, "LLM returned no answer");
                if options.verbose {
                    println!("Response: none");
                }
                PromptOutcome::NoAnswer
            }
        };

        Ok(outcome)
    }
}

fn log_failure(failure: &ExecutionFailure) {
    error!(
        prompt = %failure.prompt_name,
        kind = failure.kind(),
        "{}",
        failure
    );

    let mut chain = vec![failure.error.to_string()];
    let mut source = failure.error.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }

    debug!(
        prompt = %failure.prompt_name,
        error = ?failure.error,
        causes = %chain.join(" <- "),
        backtrace = %failure.backtrace(),
        "Full failure detail"
    );
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
