//! Response DTOs for the product cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use uuid::Uuid;

use crate::cache::{ReadOutcome, ReadSource};
use crate::store::Value;

/// Response body for GET /
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for GET /product/:id
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    /// "cache" or "miss"
    pub source: ReadSource,
    pub data: Value,
}

impl From<ReadOutcome> for ProductResponse {
    fn from(outcome: ReadOutcome) -> Self {
        Self {
            source: outcome.source,
            data: outcome.value,
        }
    }
}

/// Response body for POST /product/:id/update
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResponse {
    pub status: String,
    pub data: Value,
}

impl UpdateResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            status: "ok".to_string(),
            data,
        }
    }
}

/// Response body for POST /product/:id/regenerate
#[derive(Debug, Clone, Serialize)]
pub struct JobQueuedResponse {
    pub status: String,
    pub job_id: Uuid,
}

impl JobQueuedResponse {
    pub fn queued(job_id: Uuid) -> Self {
        Self {
            status: "queued".to_string(),
            job_id,
        }
    }
}

/// Bare status body, e.g. POST /product/:id/invalidate
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
