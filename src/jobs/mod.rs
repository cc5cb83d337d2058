//! Jobs Module
//!
//! Background cache regeneration: the job payload, the queue jobs travel
//! through, and the worker pool that executes them.

mod job;
mod queue;
mod worker;

pub use job::{JobState, RegenerationJob, REGENERATE_PRODUCT_JOB};
pub use queue::{JobHandle, JobQueue, QueuedJob};
pub use worker::{join_worker_pool, spawn_worker_pool, RegenerationWorker};
