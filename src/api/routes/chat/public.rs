//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::ollama::Message;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    // Optional per-request overrides; defaults come from the app config
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f64>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    reply: String,
}

impl ChatResponse {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[derive(Serialize)]
pub struct ChatTranscriptResponse {
    pub transcript: Vec<Message>,
}
