//! Regeneration Worker
//!
//! Recomputes a product from the source of truth and writes it back with the
//! regeneration TTL. Runs on a fixed-size pool, off the request path.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::cache::{CacheKey, CacheService, DataSource};
use crate::error::{CacheError, Result};
use crate::jobs::{JobQueue, JobState, QueuedJob, RegenerationJob, REGENERATE_PRODUCT_JOB};
use crate::models::Product;
use crate::store::Value;

/// Stateless per job: everything it holds is shared configuration.
pub struct RegenerationWorker {
    cache: Arc<CacheService>,
    source: Arc<dyn DataSource>,
    /// TTL of regenerated entries, typically longer than the backfill TTL
    ttl: Duration,
}

impl RegenerationWorker {
    pub fn new(cache: Arc<CacheService>, source: Arc<dyn DataSource>, ttl: Duration) -> Self {
        Self { cache, source, ttl }
    }

    // == Run ==
    /// Executes one job. Idempotent: running it twice leaves the same entry.
    /// On error the cache is left untouched.
    pub async fn run(&self, job: &RegenerationJob) -> Result<Product> {
        if job.name != REGENERATE_PRODUCT_JOB {
            return Err(CacheError::InvalidRequest(format!(
                "unknown job '{}'",
                job.name
            )));
        }

        let key = CacheKey::product(&job.product_id)?;
        let product = self.source.fetch(&job.product_id).await?;
        let value = Value::from_record(&product)?;
        self.cache.write(&key, &value, Some(self.ttl)).await?;

        Ok(product)
    }

    /// Drives one dequeued job through `Running` to a terminal state.
    pub async fn process(&self, queued: QueuedJob) {
        let job = &queued.job;
        queued.transition(JobState::Running);
        info!(job_id = %job.id, product_id = %job.product_id, "regeneration started");

        match self.run(job).await {
            Ok(_) => {
                self.cache.metrics().record_regeneration(true);
                info!(job_id = %job.id, product_id = %job.product_id, "regeneration completed");
                queued.transition(JobState::Completed);
            }
            Err(err) => {
                self.cache.metrics().record_regeneration(false);
                warn!(job_id = %job.id, product_id = %job.product_id, error = %err, "regeneration failed");
                queued.transition(JobState::Failed(err.to_string()));
            }
        }
    }
}

// == Worker Pool ==
/// Spawns `size` workers, each taking one job at a time from `queue`.
///
/// Workers exit once the queue is closed and drained. A dequeued job always
/// runs to completion; dropping the returned handles does not cancel them.
pub fn spawn_worker_pool(
    size: usize,
    queue: JobQueue,
    worker: Arc<RegenerationWorker>,
) -> Vec<JoinHandle<()>> {
    (0..size.max(1))
        .map(|worker_id| {
            let queue = queue.clone();
            let worker = worker.clone();
            tokio::spawn(async move {
                info!(worker_id, "regeneration worker started");
                while let Some(queued) = queue.next().await {
                    worker.process(queued).await;
                }
                info!(worker_id, "regeneration worker stopped");
            })
        })
        .collect()
}

/// Waits for every worker of a pool to finish.
pub async fn join_worker_pool(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if let Err(err) = handle.await {
            error!(error = %err, "regeneration worker panicked");
        }
    }
}
