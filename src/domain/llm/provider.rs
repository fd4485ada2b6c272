use async_trait::async_trait;
use std::fmt::Debug;

use super::{ChatRequest, ChatResponse};
use crate::domain::DomainError;

/// Transport to a chat completion backend (OpenAI, Anthropic, etc.)
#[async_trait]
pub trait ChatProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(&self, model: &str, request: ChatRequest) -> Result<ChatResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
