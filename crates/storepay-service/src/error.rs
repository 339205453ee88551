//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type.
///
/// Serializes as a flat `{"error": <message>}` body, which is the shape the
/// checkout front end expects from every endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request - invalid input or missing/invalid webhook signature.
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Server-side misconfiguration (e.g. webhook secret unset).
    #[error("{0}")]
    Config(String),

    /// The payment processor rejected or failed a request.
    #[error("{0}")]
    Processor(String),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Config(msg) | Self::Processor(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<storepay_core::ValidationError> for ApiError {
    fn from(err: storepay_core::ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<storepay_store::StoreError> for ApiError {
    fn from(err: storepay_store::StoreError) -> Self {
        match err {
            storepay_store::StoreError::NotFound => Self::NotFound("Record not found".into()),
            storepay_store::StoreError::Database(msg)
            | storepay_store::StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}
