//! Router for the model listing API

use std::sync::Arc;

use axum::{Router, extract::State, routing::get};

use super::public;
use crate::api::state::AppState;
use crate::ollama::ChatError;

type SharedState = Arc<AppState>;

/// List the models advertised by the backend
async fn models_list(
    State(state): State<SharedState>,
) -> Result<axum::Json<public::ModelsResponse>, crate::api::public::ApiError> {
    let mut session = state.session.lock().await;

    if !session.check_connection().await {
        return Err(ChatError::BackendUnavailable.into());
    }

    Ok(axum::Json(public::ModelsResponse {
        models: session.available_models().to_vec(),
    }))
}

/// Create the models router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(models_list))
}
