use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::DispatchError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`DispatchError`] for engine errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An engine error.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A request body that could not be decoded into the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Dispatch(err) => match err {
                DispatchError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
                }
                DispatchError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
                }
                DispatchError::StateConflict(msg) => {
                    (StatusCode::CONFLICT, "CONFLICT", msg.clone())
                }
            },
            AppError::InvalidBody(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Invalid request body: {msg}"),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "success": false,
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
