//! Product Cache - A read-through cache in front of a slow data source
//!
//! Provides cache-aside reads, explicit invalidation with pub/sub fanout and
//! asynchronous cache regeneration on a worker pool.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod jobs;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::{spawn_cleanup_task, spawn_invalidation_listener};
