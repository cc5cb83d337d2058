//! Cache Module
//!
//! The cache coordination layer: namespaced keys, the source-of-truth
//! contract, the metrics sink and the cache-aside service.

mod key;
mod metrics;
mod service;
mod source;

// Re-export public types
pub use key::{CacheKey, PRODUCT_ENTITY};
pub use metrics::{CacheMetrics, MetricsSink, MetricsSnapshot};
pub use service::{CacheService, ReadOutcome, ReadSource, INVALIDATION_CHANNEL};
pub use source::{CatalogSource, DataSource, SimulatedDatabase};
