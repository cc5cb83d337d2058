//! API Routes
//!
//! Configures the Axum router with all product cache endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_product_handler, health_handler, invalidate_handler, metrics_handler,
    regenerate_handler, root_handler, stats_handler, update_product_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Service banner
/// - `GET /product/:id` - Cache-aside product read
/// - `POST /product/:id/update` - Write a product and notify subscribers
/// - `POST /product/:id/regenerate` - Queue a background regeneration
/// - `POST /product/:id/invalidate` - Drop a product and notify subscribers
/// - `GET /metrics` - Prometheus metrics
/// - `GET /stats` - JSON metrics snapshot
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/product/:id", get(get_product_handler))
        .route("/product/:id/update", post(update_product_handler))
        .route("/product/:id/regenerate", post(regenerate_handler))
        .route("/product/:id/invalidate", post(invalidate_handler))
        .route("/metrics", get(metrics_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
