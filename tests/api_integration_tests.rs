//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use product_cache::api::create_router;
use product_cache::cache::{CacheMetrics, CacheService, CatalogSource, SimulatedDatabase};
use product_cache::jobs::{join_worker_pool, spawn_worker_pool, JobQueue, RegenerationWorker};
use product_cache::store::{KvAdapter, MemoryStore};
use product_cache::AppState;
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
    cache: Arc<CacheService>,
    queue: JobQueue,
}

fn create_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new(100, 16));
    let metrics = Arc::new(CacheMetrics::new());
    let cache = Arc::new(CacheService::new(
        KvAdapter::new(store.clone()),
        Arc::new(SimulatedDatabase::new()),
        metrics.clone(),
        Duration::from_secs(300),
    ));
    let queue = JobQueue::bounded(16);
    let router = create_router(AppState::new(cache.clone(), queue.clone(), metrics));

    TestApp {
        router,
        store,
        cache,
        queue,
    }
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Root and Health ==

#[tokio::test]
async fn test_root_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app.router, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app.router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Product Read ==

#[tokio::test]
async fn test_get_product_miss_then_cache() {
    let app = create_test_app();

    let (status, first) = send(&app.router, "GET", "/product/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["source"], "miss");
    assert_eq!(first["data"]["id"], "42");
    assert_eq!(first["data"]["name"], "DB Product 42");

    let (status, second) = send(&app.router, "GET", "/product/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["source"], "cache");
    assert_eq!(second["data"], first["data"]);
}

// == Update ==

#[tokio::test]
async fn test_update_writes_and_notifies() {
    let app = create_test_app();
    let mut events = app.cache.subscribe_invalidations().await.unwrap();

    let (status, json) = send(
        &app.router,
        "POST",
        "/product/5/update",
        Some(r#"{"id":"ignored","name":"Renamed","price":4.25}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["id"], "5");
    assert_eq!(events.recv().await.unwrap(), "product:5");

    let (_, read) = send(&app.router, "GET", "/product/5", None).await;
    assert_eq!(read["source"], "cache");
    assert_eq!(read["data"]["name"], "Renamed");
}

#[tokio::test]
async fn test_update_rejects_non_object_body() {
    let app = create_test_app();

    let (status, json) = send(&app.router, "POST", "/product/5/update", Some("[1,2]")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("JSON object"));
}

#[tokio::test]
async fn test_update_rejects_invalid_json() {
    let app = create_test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/product/5/update")
                .header("content-type", "application/json")
                .body(Body::from("{not valid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn test_update_without_json_content_type_is_bad_request() {
    let app = create_test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/product/5/update")
                .body(Body::from(r#"{"name":"x"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == Invalidate ==

#[tokio::test]
async fn test_invalidate_endpoint() {
    let app = create_test_app();

    send(&app.router, "GET", "/product/9", None).await;

    let (status, json) = send(&app.router, "POST", "/product/9/invalidate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "invalidated");

    let (_, read) = send(&app.router, "GET", "/product/9", None).await;
    assert_eq!(read["source"], "miss");
}

// == Regenerate ==

#[tokio::test]
async fn test_regenerate_endpoint_runs_job_in_background() {
    let app = create_test_app();
    let worker = Arc::new(RegenerationWorker::new(
        app.cache.clone(),
        Arc::new(CatalogSource::new(Duration::from_millis(10))),
        Duration::from_secs(3600),
    ));
    let pool = spawn_worker_pool(1, app.queue.clone(), worker);

    let (status, json) = send(&app.router, "POST", "/product/3/regenerate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "queued");
    assert!(json["job_id"].as_str().is_some());

    // Closing lets the pool drain the job and exit
    app.queue.close();
    join_worker_pool(pool).await;

    let (_, read) = send(&app.router, "GET", "/product/3", None).await;
    assert_eq!(read["source"], "cache");
    assert_eq!(read["data"]["name"], "Product 3");
}

#[tokio::test]
async fn test_regenerate_after_queue_closed() {
    let app = create_test_app();
    app.queue.close();

    let (status, json) = send(&app.router, "POST", "/product/3/regenerate", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["error"].as_str().unwrap().contains("Queue closed"));
}

// == Metrics ==

#[tokio::test]
async fn test_metrics_endpoint_renders_prometheus_text() {
    let app = create_test_app();

    send(&app.router, "GET", "/product/1", None).await;
    send(&app.router, "GET", "/product/1", None).await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.lines().any(|line| line == "cache_hit_total 1"));
    assert!(text.lines().any(|line| line == "cache_miss_total 1"));
    assert!(text.lines().any(|line| line == "request_latency_seconds_count 2"));
    assert!(text.contains("request_latency_seconds_bucket{le=\"0.005\"}"));
}

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    send(&app.router, "GET", "/product/1", None).await;
    send(&app.router, "GET", "/product/1", None).await;

    let (status, json) = send(&app.router, "GET", "/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["requests"], 2);
    assert_eq!(json["hit_rate"], 0.5);
}

// == Failures ==

#[tokio::test]
async fn test_store_unavailable_maps_to_503() {
    let app = create_test_app();
    app.store.close().await;

    let (status, json) = send(&app.router, "GET", "/product/1", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["error"].as_str().unwrap().contains("Store unavailable"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
