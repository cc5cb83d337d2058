//! Product Cache - A read-through cache in front of a slow data source
//!
//! Provides cache-aside reads, explicit invalidation with pub/sub fanout and
//! asynchronous cache regeneration on a worker pool.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_cache::api::{create_router, AppState};
use product_cache::cache::{CacheMetrics, CacheService, CatalogSource, SimulatedDatabase};
use product_cache::jobs::{join_worker_pool, spawn_worker_pool, JobQueue, RegenerationWorker};
use product_cache::store::{KvAdapter, MemoryStore};
use product_cache::{spawn_cleanup_task, spawn_invalidation_listener, Config};

/// Main entry point for the product cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared store and inject it into the cache service
/// 4. Start TTL cleanup, invalidation listener and regeneration workers
/// 5. Serve HTTP until SIGINT/SIGTERM
/// 6. Drain the job queue, then close the store
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting product cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: default_ttl={}s, regeneration_ttl={}s, workers={}, port={}",
        config.default_ttl, config.regeneration_ttl, config.worker_count, config.server_port
    );

    // One store for the whole process, injected everywhere it is needed
    let store = Arc::new(MemoryStore::new(config.max_entries, config.pubsub_capacity));
    let metrics = Arc::new(CacheMetrics::new());
    let cache = Arc::new(CacheService::new(
        KvAdapter::new(store.clone()),
        Arc::new(SimulatedDatabase::new()),
        metrics.clone(),
        config.backfill_ttl(),
    ));

    let cleanup_handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
    let listener_handle = spawn_invalidation_listener(cache.subscribe_invalidations().await?, |_| {});

    let queue = JobQueue::bounded(config.queue_capacity);
    let worker = Arc::new(RegenerationWorker::new(
        cache.clone(),
        Arc::new(CatalogSource::new(config.regeneration_delay())),
        config.regeneration_ttl(),
    ));
    let workers = spawn_worker_pool(config.worker_count, queue.clone(), worker);
    info!("Started {} regeneration workers", config.worker_count);

    let app = create_router(AppState::new(cache, queue.clone(), metrics));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // Dequeued jobs run to completion; queued ones are drained first
    queue.close();
    info!("Draining {} queued regeneration jobs", queue.len());
    join_worker_pool(workers).await;

    cleanup_handle.abort();
    store.close().await;
    if listener_handle.await.is_err() {
        warn!("Invalidation listener ended abnormally");
    }

    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
