//! Cache Metrics Module
//!
//! Sink for cache events (hits, misses, read latency, regeneration outcomes).
//! Events go to a Prometheus recorder rendered at `/metrics`, and to
//! lock-free counters backing the JSON snapshot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use metrics::{counter, histogram, with_local_recorder};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder};
use serde::Serialize;
use tracing::warn;

/// Metric names as exposed to Prometheus.
pub mod names {
    pub const CACHE_HIT_TOTAL: &str = "cache_hit_total";
    pub const CACHE_MISS_TOTAL: &str = "cache_miss_total";
    pub const CACHE_REGENERATION_TOTAL: &str = "cache_regeneration_total";
    pub const REQUEST_LATENCY_SECONDS: &str = "request_latency_seconds";
}

/// Latency buckets in seconds, 5 ms to 10 s.
pub const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Receives events reported by the cache service and regeneration worker.
pub trait MetricsSink: Send + Sync {
    fn record_hit(&self);
    fn record_miss(&self);
    /// One observation per read call, hit or miss.
    fn observe_latency(&self, elapsed: Duration);
    fn record_regeneration(&self, succeeded: bool);
}

// == Cache Metrics ==
/// Safe to share between request tasks and workers.
///
/// Each instance owns its recorder instead of installing a global one, so
/// several services (or tests) in one process keep separate figures.
pub struct CacheMetrics {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    hits: AtomicU64,
    misses: AtomicU64,
    requests: AtomicU64,
    latency_micros: AtomicU64,
    regenerations_completed: AtomicU64,
    regenerations_failed: AtomicU64,
}

/// Point-in-time copy of [`CacheMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    /// hits / (hits + misses), 0.0 before any lookup
    pub hit_rate: f64,
    /// Number of read latency observations
    pub requests: u64,
    pub latency_seconds_sum: f64,
    pub latency_seconds_avg: f64,
    pub regenerations_completed: u64,
    pub regenerations_failed: u64,
}

impl CacheMetrics {
    pub fn new() -> Self {
        let recorder = latency_histogram(PrometheusBuilder::new()).build_recorder();
        let handle = recorder.handle();

        Self {
            recorder,
            handle,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            requests: AtomicU64::new(0),
            latency_micros: AtomicU64::new(0),
            regenerations_completed: AtomicU64::new(0),
            regenerations_failed: AtomicU64::new(0),
        }
    }

    // == Render ==
    /// All metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }

    fn record<T>(&self, f: impl FnOnce() -> T) -> T {
        with_local_recorder(&self.recorder, f)
    }

    // == Snapshot ==
    pub fn snapshot(&self) -> MetricsSnapshot {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let requests = self.requests.load(Ordering::Relaxed);
        let latency_seconds_sum =
            Duration::from_micros(self.latency_micros.load(Ordering::Relaxed)).as_secs_f64();

        let lookups = hits + misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            hits as f64 / lookups as f64
        };
        let latency_seconds_avg = if requests == 0 {
            0.0
        } else {
            latency_seconds_sum / requests as f64
        };

        MetricsSnapshot {
            hits,
            misses,
            hit_rate,
            requests,
            latency_seconds_sum,
            latency_seconds_avg,
            regenerations_completed: self.regenerations_completed.load(Ordering::Relaxed),
            regenerations_failed: self.regenerations_failed.load(Ordering::Relaxed),
        }
    }
}

impl Default for CacheMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Buckets the latency histogram; falls back to the exporter's summary if
/// the bucket list is rejected.
fn latency_histogram(builder: PrometheusBuilder) -> PrometheusBuilder {
    let matcher = Matcher::Full(names::REQUEST_LATENCY_SECONDS.to_string());
    match builder.set_buckets_for_metric(matcher, LATENCY_BUCKETS) {
        Ok(builder) => builder,
        Err(err) => {
            warn!(error = %err, "latency buckets rejected, exporting a summary");
            PrometheusBuilder::new()
        }
    }
}

impl MetricsSink for CacheMetrics {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        self.record(|| counter!(names::CACHE_HIT_TOTAL).increment(1));
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.record(|| counter!(names::CACHE_MISS_TOTAL).increment(1));
    }

    fn observe_latency(&self, elapsed: Duration) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.latency_micros.fetch_add(micros, Ordering::Relaxed);
        self.record(|| {
            histogram!(names::REQUEST_LATENCY_SECONDS).record(elapsed.as_secs_f64())
        });
    }

    fn record_regeneration(&self, succeeded: bool) {
        let (tally, outcome) = if succeeded {
            (&self.regenerations_completed, "completed")
        } else {
            (&self.regenerations_failed, "failed")
        };
        tally.fetch_add(1, Ordering::Relaxed);
        self.record(|| {
            counter!(names::CACHE_REGENERATION_TOTAL, "outcome" => outcome).increment(1)
        });
    }
}
