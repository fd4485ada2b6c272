//! LLM domain models and traits

mod client;
mod level;
mod message;
mod provider;
mod request;
mod response;

pub use client::{LlmClient, LlmRequest};
pub use level::QualityLevel;
pub use message::{Message, MessageRole};
pub use provider::ChatProvider;
pub use request::{ChatRequest, ChatRequestBuilder, JsonSchemaFormat, ResponseFormat};
pub use response::{ChatResponse, FinishReason, Usage};

#[cfg(test)]
pub use client::MockLlmClient;
#[cfg(test)]
pub use provider::mock::MockChatProvider;
