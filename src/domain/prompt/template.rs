//! Prompt template parsing and filling
//!
//! Supports variable syntax: `${var:variable-name:default-value}`
//! - `${var:name}` - Required variable, error if no value is available
//! - `${var:name:default}` - Optional variable with default value
//!
//! Names may contain dots so handler context reads naturally, e.g.
//! `${var:request.query}`.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Regex to match variable patterns: ${var:name} or ${var:name:default}
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-_.a-zA-Z0-9]*)(?::([^}]*))?\}").unwrap()
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },

    #[error("Template parsing error: {message}")]
    ParseError { message: String },
}

/// A parsed variable from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    pub name: String,
    pub default: Option<String>,
    /// Whether the variable is required (no default)
    pub required: bool,
}

impl PromptVariable {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            required: true,
        }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
            required: false,
        }
    }
}

/// A parsed prompt template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<PromptVariable>,
}

impl PromptTemplate {
    /// Parse a template string and extract variables
    pub fn parse(content: impl Into<String>) -> Result<Self, TemplateError> {
        let content = content.into();

        // An opening marker that the pattern doesn't consume is malformed
        let well_formed = VARIABLE_PATTERN.find_iter(&content).count();
        let opened = content.matches("${var:").count();
        if opened > well_formed {
            return Err(TemplateError::ParseError {
                message: format!(
                    "{} malformed variable reference(s)",
                    opened - well_formed
                ),
            });
        }

        let mut variables = Vec::new();
        let mut seen_names = HashSet::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();

            if !seen_names.insert(name.clone()) {
                continue;
            }

            let variable = match cap.get(2) {
                Some(default) => PromptVariable::with_default(&name, default.as_str()),
                None => PromptVariable::required(&name),
            };

            variables.push(variable);
        }

        Ok(Self { content, variables })
    }

    /// Get the original template content
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[PromptVariable] {
        &self.variables
    }

    /// Get only required variables (no default value)
    pub fn required_variables(&self) -> Vec<&PromptVariable> {
        self.variables.iter().filter(|v| v.required).collect()
    }

    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }

    /// Fill every placeholder with the value returned by `lookup`, falling
    /// back to the placeholder's default.
    pub fn fill_with<F>(&self, mut lookup: F) -> Result<String, TemplateError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut result = String::with_capacity(self.content.len());
        let mut last = 0;

        for cap in VARIABLE_PATTERN.captures_iter(&self.content) {
            let Some(whole) = cap.get(0) else {
                continue;
            };
            let name = &cap[1];

            let value = match lookup(name) {
                Some(v) => v,
                None => match cap.get(2) {
                    Some(default) => default.as_str().to_string(),
                    None => {
                        return Err(TemplateError::MissingVariable {
                            name: name.to_string(),
                        })
                    }
                },
            };

            result.push_str(&self.content[last..whole.start()]);
            result.push_str(&value);
            last = whole.end();
        }

        result.push_str(&self.content[last..]);
        Ok(result)
    }

    /// Fill the template from a map of values
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        self.fill_with(|name| values.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_variables() {
        let template = PromptTemplate::parse("Hello, world!").unwrap();
        assert!(!template.has_variables());
        assert!(template.variables().is_empty());
    }

    #[test]
    fn test_parse_required_variable() {
        let template = PromptTemplate::parse("Summarize ${var:request.query}").unwrap();
        assert_eq!(template.variables().len(), 1);

        let var = &template.variables()[0];
        assert_eq!(var.name, "request.query");
        assert!(var.required);
        assert!(var.default.is_none());
    }

    #[test]
    fn test_parse_variable_with_default() {
        let template = PromptTemplate::parse("Answer in ${var:lang:English}.").unwrap();

        let var = &template.variables()[0];
        assert_eq!(var.name, "lang");
        assert!(!var.required);
        assert_eq!(var.default, Some("English".to_string()));
    }

    #[test]
    fn test_parse_duplicate_variables() {
        let template = PromptTemplate::parse("${var:site} and ${var:site} again").unwrap();
        assert_eq!(template.variables().len(), 1);
    }

    #[test]
    fn test_parse_malformed_reference() {
        let result = PromptTemplate::parse("Broken ${var:name and more");
        assert!(matches!(result, Err(TemplateError::ParseError { .. })));
    }

    #[test]
    fn test_fill_with_lookup() {
        let template =
            PromptTemplate::parse("Find ${var:item_type} items on ${var:site}.").unwrap();

        let result = template
            .fill_with(|name| match name {
                "site" => Some("siteA".to_string()),
                "item_type" => Some("recipe".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(result, "Find recipe items on siteA.");
    }

    #[test]
    fn test_fill_missing_required_variable() {
        let template = PromptTemplate::parse("Hello, ${var:name}!").unwrap();

        match template.fill_with(|_| None) {
            Err(TemplateError::MissingVariable { name }) => assert_eq!(name, "name"),
            other => panic!("Expected MissingVariable error, got {:?}", other),
        }
    }

    #[test]
    fn test_fill_uses_default_and_override() {
        let template = PromptTemplate::parse("Tone: ${var:tone:neutral}").unwrap();

        assert_eq!(template.fill_with(|_| None).unwrap(), "Tone: neutral");
        assert_eq!(
            template.fill_with(|_| Some("playful".to_string())).unwrap(),
            "Tone: playful"
        );
    }

    #[test]
    fn test_fill_value_is_not_reinterpreted() {
        let template = PromptTemplate::parse("Q: ${var:query}").unwrap();

        let result = template
            .fill_with(|_| Some("${var:query} $1".to_string()))
            .unwrap();
        assert_eq!(result, "Q: ${var:query} $1");
    }

    #[test]
    fn test_render_from_map() {
        let template = PromptTemplate::parse(
            "You are ${var:role:an assistant}. Your name is ${var:name}.",
        )
        .unwrap();

        let mut values = HashMap::new();
        values.insert("name".to_string(), "Ada".to_string());

        let result = template.render(&values).unwrap();
        assert_eq!(result, "You are an assistant. Your name is Ada.");
    }
}
