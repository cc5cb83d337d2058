//! Job Queue Module
//!
//! Bounded multi-consumer queue of regeneration jobs. Each submission returns
//! a [`JobHandle`] that follows the job through its states.

use async_channel::{Receiver, Sender};
use tokio::sync::watch;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::jobs::{JobState, RegenerationJob};

/// A job in flight together with the sender side of its state.
#[derive(Debug)]
pub struct QueuedJob {
    pub job: RegenerationJob,
    state: watch::Sender<JobState>,
}

impl QueuedJob {
    pub fn transition(&self, state: JobState) {
        // No handle left watching is fine
        let _ = self.state.send(state);
    }
}

// == Job Handle ==
/// Caller's view of a submitted job.
#[derive(Debug, Clone)]
pub struct JobHandle {
    job: RegenerationJob,
    state: watch::Receiver<JobState>,
}

impl JobHandle {
    pub fn job(&self) -> &RegenerationJob {
        &self.job
    }

    pub fn state(&self) -> JobState {
        self.state.borrow().clone()
    }

    // == Wait ==
    /// Resolves once the job reaches `Completed` or `Failed`.
    ///
    /// If the job is dropped without finishing (queue torn down before a
    /// worker picked it up), the last known state is returned.
    pub async fn wait(&self) -> JobState {
        let mut state = self.state.clone();
        // Err only means the sender is gone; the last value is still readable
        let _ = state.wait_for(JobState::is_terminal).await;
        let current = state.borrow().clone();
        current
    }
}

// == Job Queue ==
/// Cloneable submission and consumption endpoint.
#[derive(Debug, Clone)]
pub struct JobQueue {
    sender: Sender<QueuedJob>,
    receiver: Receiver<QueuedJob>,
}

impl JobQueue {
    /// Creates a queue holding at most `capacity` pending jobs.
    pub fn bounded(capacity: usize) -> Self {
        let (sender, receiver) = async_channel::bounded(capacity.max(1));
        Self { sender, receiver }
    }

    // == Enqueue ==
    /// Submits a job, waiting for room when the queue is full.
    pub async fn enqueue(&self, job_name: &str, product_id: &str) -> Result<JobHandle> {
        let job = RegenerationJob::new(job_name, product_id);
        let (state_tx, state_rx) = watch::channel(JobState::Queued);

        let handle = JobHandle {
            job: job.clone(),
            state: state_rx,
        };

        self.sender
            .send(QueuedJob {
                job,
                state: state_tx,
            })
            .await
            .map_err(|_| CacheError::QueueClosed("job queue is shut down".to_string()))?;

        debug!(job_id = %handle.job.id, job = job_name, product_id, "job enqueued");
        Ok(handle)
    }

    /// Next job, or None once the queue is closed and drained.
    pub async fn next(&self) -> Option<QueuedJob> {
        self.receiver.recv().await.ok()
    }

    /// Stops accepting jobs. Already queued jobs are still delivered.
    pub fn close(&self) -> bool {
        self.sender.close()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    pub fn len(&self) -> usize {
        self.sender.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender.is_empty()
    }
}
