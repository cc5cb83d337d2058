//! Background Tasks Module
//!
//! Long-running tasks started next to the HTTP server.
//!
//! # Tasks
//! - TTL Cleanup: removes expired store entries at configured intervals
//! - Invalidation Listener: consumes events from the invalidation channel

mod cleanup;
mod invalidation;

pub use cleanup::spawn_cleanup_task;
pub use invalidation::spawn_invalidation_listener;
