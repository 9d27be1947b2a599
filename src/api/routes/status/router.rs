//! Router for the backend status API

use std::sync::Arc;

use axum::{Router, extract::State, routing::get};

use super::public;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Report whether the inference backend is reachable
async fn status(State(state): State<SharedState>) -> axum::Json<public::StatusResponse> {
    let mut session = state.session.lock().await;
    let connected = session.check_connection().await;

    axum::Json(public::StatusResponse {
        app_name: state.config.app_name.clone(),
        page_title: state.config.page_title.clone(),
        base_url: session.base_url().to_string(),
        default_model: state.config.default_model.clone(),
        connected,
    })
}

/// Create the status router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(status))
}
