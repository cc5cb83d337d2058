//! API Handlers
//!
//! HTTP request handlers translating calls into cache service operations
//! and job submissions.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::cache::{CacheKey, CacheMetrics, CacheService, MetricsSnapshot};
use crate::error::Result;
use crate::jobs::{JobQueue, REGENERATE_PRODUCT_JOB};
use crate::models::{
    HealthResponse, JobQueuedResponse, MessageResponse, ProductResponse, StatusResponse,
    UpdateRequest, UpdateResponse,
};
use crate::store::Value;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheService>,
    pub queue: JobQueue,
    pub metrics: Arc<CacheMetrics>,
}

impl AppState {
    pub fn new(cache: Arc<CacheService>, queue: JobQueue, metrics: Arc<CacheMetrics>) -> Self {
        Self {
            cache,
            queue,
            metrics,
        }
    }
}

/// Handler for GET /
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("Product cache is running"))
}

/// Handler for GET /product/:id
///
/// Cache-aside read: served from cache, or fetched and backfilled.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let key = CacheKey::product(&product_id)?;
    let outcome = state.cache.read(&key).await?;
    Ok(Json(outcome.into()))
}

/// Handler for POST /product/:id/update
///
/// Pushes the new record into the cache, then tells subscribers to refresh.
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    payload: std::result::Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<UpdateResponse>> {
    let key = CacheKey::product(&product_id)?;
    let Json(payload) = payload?;
    let record = Value::from(UpdateRequest::from_json(payload)?.into_record(&product_id));

    state
        .cache
        .write(&key, &record, Some(state.cache.default_ttl()))
        .await?;
    state.cache.notify_invalidation(&key).await?;

    info!(key = %key, "product updated");
    Ok(Json(UpdateResponse::ok(record)))
}

/// Handler for POST /product/:id/regenerate
pub async fn regenerate_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<JobQueuedResponse>> {
    // Reject malformed ids before they reach a worker
    CacheKey::product(&product_id)?;

    let handle = state
        .queue
        .enqueue(REGENERATE_PRODUCT_JOB, &product_id)
        .await?;

    info!(job_id = %handle.job().id, product_id = %product_id, "regeneration queued");
    Ok(Json(JobQueuedResponse::queued(handle.job().id)))
}

/// Handler for POST /product/:id/invalidate
///
/// Drops the entry so the next reader regenerates it.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<StatusResponse>> {
    let key = CacheKey::product(&product_id)?;
    state.cache.invalidate(&key).await?;
    Ok(Json(StatusResponse::new("invalidated")))
}

/// Handler for GET /metrics
///
/// Prometheus text exposition of the cache counters and latency histogram.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
