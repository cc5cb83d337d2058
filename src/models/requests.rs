//! Request DTOs for the product cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde_json::{Map, Value as JsonValue};

use crate::error::{CacheError, Result};

/// Request body for POST /product/:id/update
///
/// Any JSON object is accepted; its `id` field is always replaced by the
/// product id taken from the path.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    fields: Map<String, JsonValue>,
}

impl UpdateRequest {
    /// Validates the request body. Returns an error unless it is an object.
    pub fn from_json(payload: JsonValue) -> Result<Self> {
        match payload {
            JsonValue::Object(fields) => Ok(Self { fields }),
            other => Err(CacheError::InvalidRequest(format!(
                "Update body must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// The record to cache for `product_id`.
    pub fn into_record(mut self, product_id: &str) -> JsonValue {
        self.fields
            .insert("id".to_string(), JsonValue::String(product_id.to_string()));
        JsonValue::Object(self.fields)
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
