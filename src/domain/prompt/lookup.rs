//! Prompt lookup trait

use super::{PromptDefinition, PromptKey};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Source of prompt definitions keyed by site, item type and prompt name.
///
/// A missing prompt is `Ok(None)`, never an error.
#[cfg_attr(test, automock)]
pub trait PromptLookup: Send + Sync {
    fn find(&self, key: &PromptKey) -> Result<Option<PromptDefinition>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompt::{AnswerStructure, PromptTemplate};
    use serde_json::json;

    #[test]
    fn test_mock_lookup() {
        let mut mock = MockPromptLookup::new();
        mock.expect_find()
            .withf(|key| key.name == "summarize")
            .returning(|_| {
                Ok(Some(PromptDefinition::new(
                    PromptTemplate::parse("Summarize").unwrap(),
                    AnswerStructure::new("summary", json!({})),
                )))
            });
        mock.expect_find()
            .withf(|key| key.name != "summarize")
            .returning(|_| Ok(None));

        let found = mock
            .find(&PromptKey::new("siteA", "recipe", "summarize"))
            .unwrap();
        assert!(found.is_some());

        let missing = mock
            .find(&PromptKey::new("siteA", "recipe", "missing"))
            .unwrap();
        assert!(missing.is_none());
    }
}
