//! Stored Entry Module
//!
//! Encoded value plus the expiry metadata the store manages for it.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Stored Entry ==
/// A single entry held by the in-process store.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// The encoded value (raw text or JSON)
    pub value: String,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoredEntry {
    // == Constructor ==
    /// Creates an entry expiring `ttl` from now, or never when `ttl` is None
    /// or zero.
    pub fn new(value: String, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.filter(|ttl| !ttl.is_zero()).map(|ttl| {
            let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
            current_timestamp_ms().saturating_add(millis)
        });

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Remaining lifetime, `Some(ZERO)` once expired, None without a TTL.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at.map(|expires| {
            let now = current_timestamp_ms();
            Duration::from_millis(expires.saturating_sub(now))
        })
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
