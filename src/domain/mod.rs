//! Domain layer - Prompt execution pipeline and its collaborator seams

pub mod error;
pub mod handler;
pub mod llm;
pub mod prompt;
pub mod runner;

pub use error::DomainError;
pub use handler::{Handler, QueryParams, RequestHandler};
pub use llm::{
    ChatProvider, ChatRequest, ChatResponse, LlmClient, LlmRequest, Message, MessageRole,
    QualityLevel,
};
pub use prompt::{
    AnswerStructure, PromptDefinition, PromptKey, PromptLookup, PromptTemplate, TemplateError,
    TemplateFiller, VariableFiller,
};
pub use runner::{
    ExecuteOptions, ExecutionFailure, FailurePolicy, PromptExecutor, PromptOutcome,
    PromptRunError, PromptRuntime,
};
