//! In-Memory Store Module
//!
//! HashMap storage with LRU tracking, TTL expiration and broadcast-based
//! pub/sub channels.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::{KvStore, LruTracker, StoredEntry, MAX_KEY_LENGTH, MAX_VALUE_SIZE};

#[derive(Debug)]
struct Entries {
    map: HashMap<String, StoredEntry>,
    lru: LruTracker,
}

impl Entries {
    fn remove(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.map.remove(key).is_some()
    }
}

// == Memory Store ==
/// Process-local implementation of [`KvStore`].
#[derive(Debug)]
pub struct MemoryStore {
    entries: RwLock<Entries>,
    channels: Mutex<HashMap<String, broadcast::Sender<String>>>,
    /// Maximum number of entries before LRU eviction kicks in
    max_entries: usize,
    /// Buffered messages per subscriber before it starts lagging
    pubsub_capacity: usize,
    closed: AtomicBool,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `max_entries` - Entry count above which the least recently used entry is evicted
    /// * `pubsub_capacity` - Per-subscriber message buffer of every channel
    pub fn new(max_entries: usize, pubsub_capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Entries {
                map: HashMap::new(),
                lru: LruTracker::new(),
            }),
            channels: Mutex::new(HashMap::new()),
            max_entries: max_entries.max(1),
            pubsub_capacity: pubsub_capacity.max(1),
            closed: AtomicBool::new(false),
        }
    }

    // == Close ==
    /// Marks the store unreachable. Every later operation fails with
    /// `StoreUnavailable`, and channel senders are dropped so subscribers end.
    pub async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.channels.lock().await.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let expired_keys: Vec<String> = entries
            .map
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            entries.remove(key);
        }

        expired_keys.len()
    }

    /// Number of entries currently held, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(CacheError::StoreUnavailable(
                "in-memory store is closed".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.ensure_open()?;

        // Write lock: reads update LRU order and drop expired entries
        let mut entries = self.entries.write().await;
        let expired = match entries.map.get(key) {
            None => return Ok(None),
            Some(entry) => entry.is_expired(),
        };

        if expired {
            entries.remove(key);
            debug!(key, "dropped expired entry on read");
            return Ok(None);
        }

        entries.lru.touch(key);
        Ok(entries.map.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        self.ensure_open()?;

        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let mut entries = self.entries.write().await;

        // Overwrites never evict; new keys make room first
        if !entries.map.contains_key(key) {
            while entries.map.len() >= self.max_entries {
                match entries.lru.evict_oldest() {
                    Some(evicted) => {
                        entries.map.remove(&evicted);
                        debug!(key = %evicted, "evicted least recently used entry");
                    }
                    None => break,
                }
            }
        }

        entries
            .map
            .insert(key.to_string(), StoredEntry::new(value, ttl));
        entries.lru.touch(key);

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.entries.write().await.remove(key))
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>> {
        self.ensure_open()?;
        let entries = self.entries.read().await;
        Ok(entries
            .map
            .get(key)
            .filter(|entry| !entry.is_expired())
            .and_then(|entry| entry.ttl_remaining()))
    }

    async fn publish(&self, channel: &str, message: &str) -> Result<usize> {
        self.ensure_open()?;
        let channels = self.channels.lock().await;
        let receivers = match channels.get(channel) {
            // send only fails when nobody is subscribed
            Some(sender) => sender.send(message.to_string()).unwrap_or(0),
            None => 0,
        };
        Ok(receivers)
    }

    async fn subscribe(&self, channel: &str) -> Result<broadcast::Receiver<String>> {
        self.ensure_open()?;
        let mut channels = self.channels.lock().await;
        let sender = channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.pubsub_capacity).0);
        Ok(sender.subscribe())
    }
}
