use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use ledgerlens_core::ExplorerError;

// ==============================================================================
// Error Type
// ==============================================================================

pub(crate) enum AppError {
    NotFound(String),
    UnprocessableEntity(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<ExplorerError> for AppError {
    fn from(err: ExplorerError) -> Self {
        if err.is_client_error() {
            Self::UnprocessableEntity(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}
