//! Test utilities for integration tests
use std::sync::Arc;

use axum::Router;
use axum::body::Body;

use flasq::api::{AppState, app};
use flasq::chat::ConversationSession;
use flasq::core::AppConfig;
use flasq::ollama::OllamaClient;

/// Creates a test application router pointed at a mock inference
/// backend.
pub fn test_app(backend_url: &str) -> Router {
    let app_config = AppConfig {
        ollama_base_url: backend_url.trim_end_matches('/').to_string(),
        default_model: String::from("test-model"),
        page_title: String::from("Flasq AI Assistant"),
        app_name: String::from("Flasq"),
        system_prompt: String::from("You are a helpful assistant."),
        temperature: 0.7,
        history_window: 20,
    };

    let client = OllamaClient::new(&app_config.ollama_base_url);
    let session = ConversationSession::new(client);
    let app_state = AppState::new(session, app_config);
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body was not valid UTF-8")
}
