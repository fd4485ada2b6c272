//! In-memory prompt store with site/item-type fallback

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use super::toml_file::parse_prompt_file;
use crate::domain::prompt::{PromptDefinition, PromptKey, PromptLookup, WILDCARD};
use crate::domain::DomainError;

/// Prompt store held in memory.
///
/// Resolution prefers the most specific registration:
/// site and item type, then site only, then item type only, then the
/// generic prompt registered under `*`/`*`.
#[derive(Debug, Default)]
pub struct InMemoryPromptStore {
    prompts: RwLock<HashMap<PromptKey, PromptDefinition>>,
}

impl InMemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(mut self, key: PromptKey, definition: PromptDefinition) -> Self {
        // Exclusive access: a poisoned lock must not drop the entry
        self.prompts
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, definition);
        self
    }

    /// Load prompts from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, DomainError> {
        let store = Self::new();

        for (key, definition) in parse_prompt_file(content)? {
            store.insert(key, definition)?;
        }

        Ok(store)
    }

    /// Load prompts from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::storage(format!(
                "Failed to read prompt file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let store = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), prompts = store.len(), "Loaded prompt file");
        Ok(store)
    }

    /// Register or replace a prompt
    pub fn insert(&self, key: PromptKey, definition: PromptDefinition) -> Result<(), DomainError> {
        self.prompts
            .write()
            .map_err(|_| DomainError::storage("Prompt store lock poisoned"))?
            .insert(key, definition);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.prompts.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PromptLookup for InMemoryPromptStore {
    fn find(&self, key: &PromptKey) -> Result<Option<PromptDefinition>, DomainError> {
        let prompts = self
            .prompts
            .read()
            .map_err(|_| DomainError::storage("Prompt store lock poisoned"))?;

        let candidates = [
            key.clone(),
            key.with_scope(&key.site, WILDCARD),
            key.with_scope(WILDCARD, &key.item_type),
            key.with_scope(WILDCARD, WILDCARD),
        ];

        Ok(candidates
            .iter()
            .find_map(|candidate| prompts.get(candidate))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompt::{AnswerStructure, PromptTemplate};
    use serde_json::json;

    fn definition(text: &str) -> PromptDefinition {
        PromptDefinition::new(
            PromptTemplate::parse(text).unwrap(),
            AnswerStructure::new("answer", json!({"answer": "string"})),
        )
    }

    #[test]
    fn test_exact_match() {
        let store = InMemoryPromptStore::new().with_prompt(
            PromptKey::new("siteA", "recipe", "summarize"),
            definition("recipe summary"),
        );

        let found = store
            .find(&PromptKey::new("siteA", "recipe", "summarize"))
            .unwrap()
            .unwrap();
        assert_eq!(found.template().content(), "recipe summary");

        let missing = store
            .find(&PromptKey::new("siteA", "recipe", "missing"))
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_fallback_order() {
        let store = InMemoryPromptStore::new()
            .with_prompt(PromptKey::new("*", "*", "rank"), definition("generic"))
            .with_prompt(PromptKey::new("*", "movie", "rank"), definition("movie"))
            .with_prompt(PromptKey::new("siteB", "*", "rank"), definition("siteB"))
            .with_prompt(
                PromptKey::new("siteB", "movie", "rank"),
                definition("siteB movie"),
            );

        let content = |site: &str, item_type: &str| {
            store
                .find(&PromptKey::new(site, item_type, "rank"))
                .unwrap()
                .map(|d| d.template().content().to_string())
        };

        assert_eq!(content("siteB", "movie").as_deref(), Some("siteB movie"));
        assert_eq!(content("siteB", "recipe").as_deref(), Some("siteB"));
        assert_eq!(content("siteC", "movie").as_deref(), Some("movie"));
        assert_eq!(content("siteC", "recipe").as_deref(), Some("generic"));
    }

    #[test]
    fn test_insert_replaces() {
        let store = InMemoryPromptStore::new();
        let key = PromptKey::new("siteA", "recipe", "summarize");

        store.insert(key.clone(), definition("first")).unwrap();
        store.insert(key.clone(), definition("second")).unwrap();

        assert_eq!(store.len(), 1);
        let found = store.find(&key).unwrap().unwrap();
        assert_eq!(found.template().content(), "second");
    }

    #[test]
    fn test_with_prompt_survives_poisoned_lock() {
        let store = InMemoryPromptStore::new();
        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _writer = store.prompts.write().unwrap();
            panic!("writer failed mid-update");
        }));
        assert!(poisoned.is_err());
        assert!(store.prompts.is_poisoned());

        let key = PromptKey::new("siteA", "recipe", "summarize");
        let store = store.with_prompt(key.clone(), definition("kept"));

        let prompts = store.prompts.read().unwrap_or_else(PoisonError::into_inner);
        assert_eq!(prompts.get(&key).map(|d| d.template().content()), Some("kept"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = InMemoryPromptStore::from_file("/nonexistent/prompts.toml");
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
