//! Prompt store implementations

mod in_memory;
mod toml_file;

pub use in_memory::InMemoryPromptStore;
pub use toml_file::{parse_prompt_file, PromptFile, PromptFileEntry};
