//! KV Store Adapter
//!
//! Typed access to a shared [`KvStore`]: values go through the [`Value`]
//! codec on the way in and out.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::error::Result;
use crate::store::{KvStore, Value};

/// Cheap-to-clone handle shared by the cache service and workers.
#[derive(Clone)]
pub struct KvAdapter {
    store: Arc<dyn KvStore>,
}

impl KvAdapter {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Reads and decodes a value. `Ok(None)` means absent; errors mean the
    /// store could not be reached.
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.store.get(key).await?.map(Value::decode))
    }

    pub async fn set(&self, key: &str, value: &Value, ttl: Option<Duration>) -> Result<()> {
        self.store.set(key, value.encode(), ttl).await
    }

    /// Removes the key. Succeeds whether or not it was present.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.store.delete(key).await?;
        Ok(())
    }

    pub async fn ttl(&self, key: &str) -> Result<Option<Duration>> {
        self.store.ttl(key).await
    }

    pub async fn publish(&self, channel: &str, message: &str) -> Result<usize> {
        self.store.publish(channel, message).await
    }

    pub async fn subscribe(&self, channel: &str) -> Result<broadcast::Receiver<String>> {
        self.store.subscribe(channel).await
    }

    /// Writes raw text, bypassing the value codec.
    pub async fn set_raw(&self, key: &str, raw: &str, ttl: Option<Duration>) -> Result<()> {
        self.store.set(key, raw.to_string(), ttl).await
    }
}
