//! Prompt definition and lookup key types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PromptTemplate;

/// Key matching any site or item type in a prompt store
pub const WILDCARD: &str = "*";

/// Lookup key for a prompt: the handler's site and item type plus the prompt name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptKey {
    pub site: String,
    pub item_type: String,
    pub name: String,
}

impl PromptKey {
    pub fn new(
        site: impl Into<String>,
        item_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            item_type: item_type.into(),
            name: name.into(),
        }
    }

    /// Same prompt name with the given site and item type
    pub fn with_scope(&self, site: &str, item_type: &str) -> Self {
        Self::new(site, item_type, self.name.clone())
    }
}

impl std::fmt::Display for PromptKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.site, self.item_type, self.name)
    }
}

/// Shape the LLM's structured answer must conform to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerStructure {
    pub name: String,
    #[serde(default)]
    pub strict: bool,
    pub schema: Value,
}

impl AnswerStructure {
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            strict: false,
            schema,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// A resolved prompt: template text paired with its answer structure
#[derive(Debug, Clone, PartialEq)]
pub struct PromptDefinition {
    template: PromptTemplate,
    answer_structure: AnswerStructure,
}

impl PromptDefinition {
    pub fn new(template: PromptTemplate, answer_structure: AnswerStructure) -> Self {
        Self {
            template,
            answer_structure,
        }
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    pub fn answer_structure(&self) -> &AnswerStructure {
        &self.answer_structure
    }

    pub fn into_parts(self) -> (PromptTemplate, AnswerStructure) {
        (self.template, self.answer_structure)
    }
}
