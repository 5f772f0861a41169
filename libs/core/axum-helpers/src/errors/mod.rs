pub mod handlers;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Message used when a JSON request body cannot be extracted.
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";

/// Error body returned by every failing endpoint.
///
/// ```json
/// {
///   "message": "Account creation failed",
///   "cause": "already same id is used"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable summary of what failed
    pub message: String,
    /// Machine-readable reason, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

/// Application error type that renders as an [`ErrorResponse`].
///
/// Domain crates convert their own error enums into this type so that status
/// codes and body shape stay uniform across the API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// Always a 400; the rejection's own 415/422 is reported only in `cause`.
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Bad Request: {message}")]
    BadRequest {
        message: String,
        cause: Option<String>,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, cause: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_) | AppError::BadRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(%status, "JSON extraction error: {}", e.body_text());
                ErrorResponse::new(INVALID_REQUEST_BODY).with_cause(e.body_text())
            }
            AppError::BadRequest { message, cause } => {
                tracing::info!(?cause, "Bad request: {}", message);
                ErrorResponse { message, cause }
            }
            AppError::Unauthorized(message) => {
                tracing::info!("Unauthorized: {}", message);
                ErrorResponse::new(message)
            }
            AppError::Forbidden(message) => {
                tracing::info!("Forbidden: {}", message);
                ErrorResponse::new(message)
            }
            AppError::NotFound(message) => {
                tracing::info!("Not found: {}", message);
                ErrorResponse::new(message)
            }
        };

        (status, Json(body)).into_response()
    }
}
