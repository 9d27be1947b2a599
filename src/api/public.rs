//! Public API types

use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::ollama::ChatError;

// Errors

pub struct ApiError(ChatError);

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self.0);

        let status = match &self.0 {
            ChatError::EmptyInput => StatusCode::BAD_REQUEST,
            ChatError::BackendUnavailable | ChatError::ConnectionRefused => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ChatError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ChatError::BadStatus { .. } => StatusCode::BAD_GATEWAY,
            ChatError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.0.to_string()).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self(err)
    }
}

// Re-export public types from each route

pub mod chat {
    pub use crate::api::routes::chat::public::*;
}

pub mod models {
    pub use crate::api::routes::models::public::*;
}

pub mod status {
    pub use crate::api::routes::status::public::*;
}
