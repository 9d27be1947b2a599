//! HTTP client for an Ollama-compatible inference backend.
mod core;

pub use self::core::{ChatError, ChatOptions, Message, OllamaClient, Role};
