//! Prompt execution - runs a named prompt for a handler

mod executor;
mod options;
mod outcome;
mod policy;
mod runtime;

pub use executor::PromptExecutor;
pub use options::{ExecuteOptions, DEFAULT_TIMEOUT};
pub use outcome::{ExecutionFailure, PromptOutcome, PromptRunError};
pub use policy::{FailurePolicy, FailurePolicySwitch};
pub use runtime::{PromptRuntime, PromptRuntimeBuilder};
