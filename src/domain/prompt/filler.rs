//! Template filling from handler context

use super::PromptTemplate;
use crate::domain::{DomainError, Handler};

/// Turns a prompt template into prompt text using the handler as value source
pub trait TemplateFiller: Send + Sync {
    fn fill(&self, template: &PromptTemplate, handler: &dyn Handler) -> Result<String, DomainError>;
}

/// Fills `${var:...}` placeholders with [`Handler::field`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableFiller;

impl TemplateFiller for VariableFiller {
    fn fill(&self, template: &PromptTemplate, handler: &dyn Handler) -> Result<String, DomainError> {
        Ok(template.fill_with(|name| handler.field(name))?)
    }
}
