//! Cache Service Module
//!
//! Cache-aside reads, unconditional writes, and invalidation with pub/sub
//! broadcast on top of the KV store adapter.
//!
//! No per-key locking happens here: concurrent writers race at the store,
//! and concurrent misses for the same key each go to the source.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::cache::{CacheKey, DataSource, MetricsSink};
use crate::error::Result;
use crate::store::{KvAdapter, Value};

/// Pub/sub channel carrying invalidated keys as plain text.
pub const INVALIDATION_CHANNEL: &str = "cache_invalidation";

/// Where a read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadSource {
    /// The value was already cached
    Cache,
    /// The value was fetched from the source and backfilled
    Miss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutcome {
    pub value: Value,
    pub source: ReadSource,
}

// == Cache Service ==
pub struct CacheService {
    adapter: KvAdapter,
    source: Arc<dyn DataSource>,
    metrics: Arc<dyn MetricsSink>,
    /// TTL applied when a miss is backfilled
    default_ttl: Duration,
}

impl CacheService {
    pub fn new(
        adapter: KvAdapter,
        source: Arc<dyn DataSource>,
        metrics: Arc<dyn MetricsSink>,
        default_ttl: Duration,
    ) -> Self {
        Self {
            adapter,
            source,
            metrics,
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn metrics(&self) -> &Arc<dyn MetricsSink> {
        &self.metrics
    }

    // == Read ==
    /// Returns the cached value, or fetches, backfills and returns it.
    ///
    /// Latency is observed once per call whatever the outcome. Store and
    /// source failures are returned as-is; no stale value is substituted.
    pub async fn read(&self, key: &CacheKey) -> Result<ReadOutcome> {
        let started = Instant::now();
        let outcome = self.read_through(key).await;
        self.metrics.observe_latency(started.elapsed());
        outcome
    }

    async fn read_through(&self, key: &CacheKey) -> Result<ReadOutcome> {
        if let Some(value) = self.adapter.get(key.as_str()).await? {
            self.metrics.record_hit();
            debug!(key = %key, "cache hit");
            return Ok(ReadOutcome {
                value,
                source: ReadSource::Cache,
            });
        }

        self.metrics.record_miss();
        debug!(key = %key, "cache miss, fetching from source");

        let record = self.source.fetch(key.id()).await?;
        let value = Value::from_record(&record)?;
        self.write(key, &value, Some(self.default_ttl)).await?;

        Ok(ReadOutcome {
            value,
            source: ReadSource::Miss,
        })
    }

    // == Write ==
    /// Overwrites the entry. Subscribers are not notified.
    pub async fn write(&self, key: &CacheKey, value: &Value, ttl: Option<Duration>) -> Result<()> {
        self.adapter.set(key.as_str(), value, ttl).await
    }

    // == Invalidate ==
    /// Deletes the entry, then announces the key on the invalidation channel.
    ///
    /// The two steps are not atomic: a concurrent reader may backfill the key
    /// between them.
    pub async fn invalidate(&self, key: &CacheKey) -> Result<()> {
        self.adapter.delete(key.as_str()).await?;
        let receivers = self.notify_invalidation(key).await?;
        info!(key = %key, receivers, "invalidated cache entry");
        Ok(())
    }

    /// Announces the key without deleting it. Returns the number of
    /// subscribers that received the event.
    pub async fn notify_invalidation(&self, key: &CacheKey) -> Result<usize> {
        self.adapter
            .publish(INVALIDATION_CHANNEL, key.as_str())
            .await
    }

    pub async fn subscribe_invalidations(&self) -> Result<broadcast::Receiver<String>> {
        self.adapter.subscribe(INVALIDATION_CHANNEL).await
    }

    /// Remaining store-managed lifetime of the entry.
    pub async fn ttl(&self, key: &CacheKey) -> Result<Option<Duration>> {
        self.adapter.ttl(key.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheMetrics, SimulatedDatabase};
    use crate::store::MemoryStore;
    use serde_json::json;

    fn service() -> (Arc<CacheMetrics>, CacheService) {
        let metrics = Arc::new(CacheMetrics::new());
        let service = CacheService::new(
            KvAdapter::new(Arc::new(MemoryStore::new(100, 16))),
            Arc::new(SimulatedDatabase::new()),
            metrics.clone(),
            Duration::from_secs(300),
        );
        (metrics, service)
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let (metrics, service) = service();
        let key = CacheKey::product("42").unwrap();

        let first = service.read(&key).await.unwrap();
        let second = service.read(&key).await.unwrap();

        assert_eq!(first.source, ReadSource::Miss);
        assert_eq!(second.source, ReadSource::Cache);
        assert_eq!(first.value, second.value);
        assert_eq!(
            first.value,
            Value::from(json!({"id": "42", "name": "DB Product 42", "price": 19.99}))
        );

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.hits, 1);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.requests, 2);
    }

    #[tokio::test]
    async fn test_backfill_uses_default_ttl() {
        let (_, service) = service();
        let key = CacheKey::product("1").unwrap();

        service.read(&key).await.unwrap();

        let ttl = service.ttl(&key).await.unwrap().unwrap();
        assert!(ttl <= Duration::from_secs(300));
        assert!(ttl > Duration::from_secs(290));
    }

    #[tokio::test]
    async fn test_notify_keeps_entry() {
        let (_, service) = service();
        let key = CacheKey::product("3").unwrap();
        let mut events = service.subscribe_invalidations().await.unwrap();

        service.write(&key, &Value::from("fresh"), None).await.unwrap();
        assert_eq!(service.notify_invalidation(&key).await.unwrap(), 1);

        assert_eq!(events.recv().await.unwrap(), "product:3");
        let outcome = service.read(&key).await.unwrap();
        assert_eq!(outcome.source, ReadSource::Cache);
        assert_eq!(outcome.value, Value::Text("fresh".to_string()));
    }

    #[tokio::test]
    async fn test_write_does_not_publish() {
        let (_, service) = service();
        let key = CacheKey::product("4").unwrap();
        let mut events = service.subscribe_invalidations().await.unwrap();

        service.write(&key, &Value::from("v"), None).await.unwrap();

        assert!(events.try_recv().is_err());
    }
}
