//! Store Backend Contract
//!
//! The raw operations a shared key-value store must offer: text values with
//! optional expiry, plus named pub/sub channels.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::Result;

/// Raw key-value store with TTL support and pub/sub.
///
/// Implementations are shared by every caller behind an `Arc` and must be
/// safe for concurrent use without external locking. Single-key operations
/// are atomic; concurrent writers to one key resolve as last-write-wins.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Returns the stored text, `Ok(None)` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value`, replacing any previous entry and its TTL.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()>;

    /// Removes the entry. Returns whether one was present.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Remaining lifetime of a key. None when the key is absent or never expires.
    async fn ttl(&self, key: &str) -> Result<Option<Duration>>;

    /// Fans `message` out to the channel's current subscribers and returns
    /// how many received it. Never waits on slow subscribers.
    async fn publish(&self, channel: &str, message: &str) -> Result<usize>;

    /// Receives messages published on `channel` from now on.
    async fn subscribe(&self, channel: &str) -> Result<broadcast::Receiver<String>>;
}
