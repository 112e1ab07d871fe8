//! Error handling module
//!
//! HTTP-facing error type and response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::ErrorKind;
use crate::handlers::UseCaseError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    // Use-case errors, mapped by kind
    #[error(transparent)]
    UseCase(#[from] UseCaseError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // 404 Not Found
            AppError::UserNotFound(id) => {
                (StatusCode::NOT_FOUND, "user_not_found", Some(id.clone()))
            }

            // 404 / 409 / 500 by classification
            AppError::UseCase(err) => match err.kind() {
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, "user_not_found", None),
                ErrorKind::AlreadyExists => (StatusCode::CONFLICT, "user_already_exists", None),
                ErrorKind::Other => {
                    tracing::error!("Use case error: {:?}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
                }
            },
        };

        let error = if status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            match &self {
                AppError::UseCase(err) => err.source.to_string(),
                other => other.to_string(),
            }
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
