//! API Module
//!
//! HTTP handlers and routing for the product cache REST API.
//!
//! # Endpoints
//! - `GET /product/:id` - Read a product through the cache
//! - `POST /product/:id/update` - Write a product and broadcast it
//! - `POST /product/:id/regenerate` - Queue a background regeneration
//! - `POST /product/:id/invalidate` - Invalidate a product
//! - `GET /metrics` - Cache metrics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
