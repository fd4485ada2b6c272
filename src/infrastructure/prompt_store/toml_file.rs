//! TOML prompt file format
//!
//! ```toml
//! [[prompts]]
//! name = "summarize"
//! site = "siteA"          # optional, defaults to "*"
//! item_type = "recipe"    # optional, defaults to "*"
//! template = "Summarize ${var:query} for ${var:site}"
//! strict = true           # optional
//!
//! [prompts.answer_structure]
//! summary = "string"
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::domain::prompt::{
    AnswerStructure, PromptDefinition, PromptKey, PromptTemplate, WILDCARD,
};
use crate::domain::DomainError;

#[derive(Debug, Deserialize)]
pub struct PromptFile {
    #[serde(default)]
    pub prompts: Vec<PromptFileEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PromptFileEntry {
    pub name: String,
    #[serde(default = "wildcard")]
    pub site: String,
    #[serde(default = "wildcard")]
    pub item_type: String,
    pub template: String,
    pub answer_structure: Value,
    /// Name of the answer structure, defaults to the prompt name
    #[serde(default)]
    pub answer_name: Option<String>,
    #[serde(default)]
    pub strict: bool,
}

fn wildcard() -> String {
    WILDCARD.to_string()
}

impl PromptFileEntry {
    fn into_definition(self) -> Result<(PromptKey, PromptDefinition), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::configuration("Prompt entry has an empty name"));
        }

        let key = PromptKey::new(self.site, self.item_type, self.name);
        if self.answer_structure.is_null() {
            return Err(DomainError::configuration(format!(
                "Prompt '{}' has no answer structure",
                key
            )));
        }

        let template = PromptTemplate::parse(self.template).map_err(|e| {
            DomainError::configuration(format!("Invalid template for prompt '{}': {}", key, e))
        })?;

        let answer_name = self.answer_name.unwrap_or_else(|| key.name.clone());
        let answer_structure =
            AnswerStructure::new(answer_name, self.answer_structure).strict(self.strict);

        Ok((key, PromptDefinition::new(template, answer_structure)))
    }
}

/// Parse a prompt file into store entries
pub fn parse_prompt_file(content: &str) -> Result<Vec<(PromptKey, PromptDefinition)>, DomainError> {
    let file: PromptFile = toml::from_str(content)
        .map_err(|e| DomainError::configuration(format!("Invalid prompt file: {}", e)))?;

    file.prompts
        .into_iter()
        .map(PromptFileEntry::into_definition)
        .collect()
}
