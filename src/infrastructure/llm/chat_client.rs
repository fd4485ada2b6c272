//! LlmClient adapter over a chat completion provider

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::llm::{
    ChatProvider, ChatRequest, JsonSchemaFormat, LlmClient, LlmRequest, QualityLevel,
    ResponseFormat,
};
use crate::domain::DomainError;

/// Model used for each quality level
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModelTiers {
    pub low: String,
    pub high: String,
}

impl Default for ModelTiers {
    fn default() -> Self {
        Self {
            low: "gpt-4o-mini".to_string(),
            high: "gpt-4o".to_string(),
        }
    }
}

impl ModelTiers {
    pub fn model_for(&self, level: QualityLevel) -> &str {
        match level {
            QualityLevel::Low => &self.low,
            QualityLevel::High => &self.high,
        }
    }
}

/// Asks a chat provider for a JSON answer shaped like the answer structure
#[derive(Debug)]
pub struct ChatCompletionClient {
    provider: Arc<dyn ChatProvider>,
    models: ModelTiers,
    temperature: Option<f32>,
}

impl ChatCompletionClient {
    pub fn new(provider: Arc<dyn ChatProvider>, models: ModelTiers) -> Self {
        Self {
            provider,
            models,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn build_request(&self, request: LlmRequest) -> Result<ChatRequest, DomainError> {
        let schema = serde_json::to_string_pretty(&request.answer_structure.schema)
            .map_err(|e| DomainError::internal(format!("Failed to encode answer structure: {}", e)))?;

        let mut builder = ChatRequest::builder()
            .system(format!(
                "Respond only with a JSON value that matches this structure:\n{}",
                schema
            ))
            .user(request.prompt)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: JsonSchemaFormat {
                    name: request.answer_structure.name,
                    strict: request.answer_structure.strict,
                    schema: request.answer_structure.schema,
                },
            })
            .metadata(request.query_params);

        if let Some(temperature) = self.temperature {
            builder = builder.temperature(temperature);
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl LlmClient for ChatCompletionClient {
    async fn ask(&self, request: LlmRequest) -> Result<Option<Value>, DomainError> {
        let model = self.models.model_for(request.level);
        let provider = self.provider.provider_name();
        debug!(%provider, %model, level = %request.level, "Sending chat completion");

        let chat_request = self.build_request(request)?;
        let response = self.provider.chat(model, chat_request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                %provider,
                %model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        parse_answer(provider, response.content())
    }
}

/// Parse model output as JSON. Blank output and `null` mean no answer.
fn parse_answer(provider: &str, content: &str) -> Result<Option<Value>, DomainError> {
    let body = strip_code_fence(content.trim());

    if body.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(DomainError::provider(
            provider,
            format!("Response is not valid JSON: {}", e),
        )),
    }
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };

    // Drop the info string (e.g. "json") on the opening line
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    rest.strip_suffix("```").unwrap_or(rest).trim()
}
