//! Regeneration job payload and its state machine.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Job name of a product cache regeneration.
pub const REGENERATE_PRODUCT_JOB: &str = "regenerate_product_cache";

/// Typed job description handed from the enqueuer to a worker.
#[derive(Debug, Clone, Serialize)]
pub struct RegenerationJob {
    pub id: Uuid,
    pub name: String,
    pub product_id: String,
    pub enqueued_at: DateTime<Utc>,
}

impl RegenerationJob {
    pub fn new(name: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            product_id: product_id.into(),
            enqueued_at: Utc::now(),
        }
    }
}

/// `Queued -> Running -> Completed`, or `Queued -> Running -> Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Running,
    Completed,
    /// Terminal, never retried
    Failed(String),
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed(_))
    }
}
