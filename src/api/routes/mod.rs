//! API routes module

pub mod chat;
pub mod models;
pub mod status;

use std::sync::Arc;

use axum::Router;

use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Chat routes
        .nest("/chat", chat::router())
        // Model listing routes
        .nest("/models", models::router())
        // Backend status routes
        .nest("/status", status::router())
}
