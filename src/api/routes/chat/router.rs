//! Router for the chat API

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use super::public;
use crate::api::state::AppState;
use crate::chat::SessionConfig;

type SharedState = Arc<AppState>;

/// Submit a user message and return the assistant's reply
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let config = &state.config;
    let session_config = SessionConfig::new(
        payload.model.as_deref().unwrap_or(&config.default_model),
        payload
            .system_prompt
            .as_deref()
            .unwrap_or(&config.system_prompt),
        payload.temperature.unwrap_or(config.temperature),
        config.history_window,
    );

    let mut session = state.session.lock().await;

    // Probe the backend if it has not been seen reachable yet;
    // request failures are classified and rolled back by the session
    // either way
    if !session.is_connected() {
        session.check_connection().await;
    }

    let turn = session.submit(&payload.message, &session_config).await?;

    Ok(axum::Json(public::ChatResponse::new(&turn.content)))
}

/// Get the transcript of the current session
async fn chat_history(State(state): State<SharedState>) -> impl IntoResponse {
    let session = state.session.lock().await;

    axum::Json(public::ChatTranscriptResponse {
        transcript: session.transcript(),
    })
}

/// Clear the current session
async fn chat_clear(State(state): State<SharedState>) -> StatusCode {
    let mut session = state.session.lock().await;
    session.clear();

    StatusCode::NO_CONTENT
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route(
        "/",
        post(chat_handler).get(chat_history).delete(chat_clear),
    )
}
