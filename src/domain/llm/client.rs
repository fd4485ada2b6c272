use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::QualityLevel;
use crate::domain::prompt::AnswerStructure;
use crate::domain::{DomainError, QueryParams};

#[cfg(test)]
use mockall::automock;

/// A single structured-answer request for a filled prompt
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub prompt: String,
    pub answer_structure: AnswerStructure,
    pub level: QualityLevel,
    /// Latency budget for the call
    pub timeout: Duration,
    pub query_params: QueryParams,
}

/// Asks an LLM for a structured answer.
///
/// `Ok(None)` means the model produced nothing usable. Transport, provider
/// and timeout failures are errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn ask(&self, request: LlmRequest) -> Result<Option<Value>, DomainError>;
}
