//! Error types for the product cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache coordination layer.
///
/// A missing key is not an error: adapter reads return `Ok(None)` so that
/// absence and an unreachable store stay distinct.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The key-value store cannot be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The authoritative data source failed
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// Invalid request data (malformed key, oversized value, bad body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The job queue no longer accepts submissions
    #[error("Queue closed: {0}")]
    QueueClosed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Internal(format!("serialization failed: {}", err))
    }
}

/// Malformed or mistyped request bodies answer with the JSON error body.
impl From<JsonRejection> for CacheError {
    fn from(rejection: JsonRejection) -> Self {
        CacheError::InvalidRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::SourceUnavailable(_) => StatusCode::BAD_GATEWAY,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::QueueClosed(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the product cache.
pub type Result<T> = std::result::Result<T, CacheError>;
