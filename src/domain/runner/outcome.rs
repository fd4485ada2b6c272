use std::backtrace::Backtrace;

use serde_json::Value;
use thiserror::Error;

use crate::domain::DomainError;

/// Result of running a prompt, keeping apart the cases `execute` collapses
#[derive(Debug)]
pub enum PromptOutcome {
    /// The model answered
    Answered(Value),
    /// No prompt is registered for the handler's site and item type
    NotFound,
    /// The model produced nothing usable
    NoAnswer,
    /// Lookup, fill or invocation failed
    Failed(ExecutionFailure),
}

impl PromptOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The answer, if any, dropping the distinction between the other cases
    pub fn into_answer(self) -> Option<Value> {
        match self {
            Self::Answered(value) => Some(value),
            _ => None,
        }
    }
}

/// A failure while executing a named prompt
#[derive(Debug)]
pub struct ExecutionFailure {
    pub prompt_name: String,
    pub error: DomainError,
    backtrace: Backtrace,
}

impl ExecutionFailure {
    /// Record a failure, capturing the backtrace here when `RUST_BACKTRACE`
    /// enables it
    pub fn new(prompt_name: impl Into<String>, error: DomainError) -> Self {
        Self::with_backtrace(prompt_name, error, Backtrace::capture())
    }

    pub fn with_backtrace(
        prompt_name: impl Into<String>,
        error: DomainError,
        backtrace: Backtrace,
    ) -> Self {
        Self {
            prompt_name: prompt_name.into(),
            error,
            backtrace,
        }
    }

    /// Stack at the point the failure was recorded
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub fn kind(&self) -> &'static str {
        self.error.kind()
    }
}

impl std::fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Error running prompt '{}': {}: {}",
            self.prompt_name,
            self.kind(),
            self.error
        )
    }
}

/// Error returned by `execute` under the raise policy
#[derive(Debug, Error)]
pub enum PromptRunError {
    #[error("LLM call failed for prompt '{prompt}': {kind}: {message}")]
    Execution {
        prompt: String,
        kind: &'static str,
        message: String,
        #[source]
        source: DomainError,
    },
}

impl PromptRunError {
    /// The collaborator error that caused the failure
    pub fn cause(&self) -> &DomainError {
        match self {
            Self::Execution { source, .. } => source,
        }
    }
}

impl From<ExecutionFailure> for PromptRunError {
    fn from(failure: ExecutionFailure) -> Self {
        let ExecutionFailure {
            prompt_name, error, ..
        } = failure;

        Self::Execution {
            kind: error.kind(),
            message: error.to_string(),
            prompt: prompt_name,
            source: error,
        }
    }
}
