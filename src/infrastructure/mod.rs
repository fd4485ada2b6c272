//! Infrastructure layer - Collaborator implementations and process setup

pub mod llm;
pub mod logging;
pub mod prompt_store;
