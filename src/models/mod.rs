//! Request and Response models for the product cache
//!
//! This module defines the domain record and the DTOs (Data Transfer Objects)
//! used for serializing/deserializing HTTP request and response bodies.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::Product;
pub use requests::UpdateRequest;
pub use responses::{
    ErrorResponse, HealthResponse, JobQueuedResponse, MessageResponse, ProductResponse,
    StatusResponse, UpdateResponse,
};
