//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds applied when a read miss is backfilled
    pub default_ttl: u64,
    /// TTL in seconds applied by the regeneration worker
    pub regeneration_ttl: u64,
    /// Maximum number of entries the in-process store can hold
    pub max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Number of regeneration workers
    pub worker_count: usize,
    /// Maximum number of queued regeneration jobs
    pub queue_capacity: usize,
    /// Per-subscriber buffer of the pub/sub channels
    pub pubsub_capacity: usize,
    /// Simulated recomputation time of a regeneration, in milliseconds
    pub regeneration_delay_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_TTL` - Backfill TTL in seconds (default: 300)
    /// - `REGENERATION_TTL` - Regeneration TTL in seconds (default: 3600)
    /// - `MAX_ENTRIES` - Maximum store entries (default: 10000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `WORKER_COUNT` - Regeneration worker pool size (default: 4)
    /// - `QUEUE_CAPACITY` - Job queue capacity (default: 256)
    /// - `PUBSUB_CAPACITY` - Pub/sub buffer per subscriber (default: 1024)
    /// - `REGENERATION_DELAY_MS` - Simulated recomputation time (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            regeneration_ttl: env_or("REGENERATION_TTL", defaults.regeneration_ttl),
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            worker_count: env_or("WORKER_COUNT", defaults.worker_count),
            queue_capacity: env_or("QUEUE_CAPACITY", defaults.queue_capacity),
            pubsub_capacity: env_or("PUBSUB_CAPACITY", defaults.pubsub_capacity),
            regeneration_delay_ms: env_or(
                "REGENERATION_DELAY_MS",
                defaults.regeneration_delay_ms,
            ),
        }
    }

    /// Backfill TTL as a Duration.
    pub fn backfill_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Regeneration TTL as a Duration.
    pub fn regeneration_ttl(&self) -> Duration {
        Duration::from_secs(self.regeneration_ttl)
    }

    pub fn regeneration_delay(&self) -> Duration {
        Duration::from_millis(self.regeneration_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            default_ttl: 300,
            regeneration_ttl: 3600,
            max_entries: 10_000,
            cleanup_interval: 1,
            worker_count: 4,
            queue_capacity: 256,
            pubsub_capacity: 1024,
            regeneration_delay_ms: 3000,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
