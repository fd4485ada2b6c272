//! Prompt domain - Templates, answer structures and lookup

mod entity;
mod filler;
mod lookup;
mod template;

pub use entity::{AnswerStructure, PromptDefinition, PromptKey, WILDCARD};
pub use filler::{TemplateFiller, VariableFiller};
pub use lookup::PromptLookup;
pub use template::{PromptTemplate, PromptVariable, TemplateError};

#[cfg(test)]
pub use lookup::MockPromptLookup;
