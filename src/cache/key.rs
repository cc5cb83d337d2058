//! Cache Key Module
//!
//! Namespaced keys of the form `<entityType>:<id>`.

use std::fmt;
use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Entity type of product records.
pub const PRODUCT_ENTITY: &str = "product";

// == Cache Key ==
/// A namespaced cache key. The id part is what the data source is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    full: String,
    /// Byte offset of the `:` separator
    split: usize,
}

impl CacheKey {
    /// Builds `<entity>:<id>`. The entity must not contain `:`.
    pub fn new(entity: &str, id: &str) -> Result<Self> {
        if entity.is_empty() || entity.contains(':') {
            return Err(CacheError::InvalidRequest(format!(
                "Invalid entity type '{}'",
                entity
            )));
        }
        if id.is_empty() {
            return Err(CacheError::InvalidRequest("Id cannot be empty".to_string()));
        }

        Ok(Self {
            full: format!("{}:{}", entity, id),
            split: entity.len(),
        })
    }

    pub fn product(id: &str) -> Result<Self> {
        Self::new(PRODUCT_ENTITY, id)
    }

    /// Parses a full key, splitting on the first `:`.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.split_once(':') {
            Some((entity, id)) => Self::new(entity, id),
            None => Err(CacheError::InvalidRequest(format!(
                "Key '{}' is not of the form <entity>:<id>",
                raw
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }

    pub fn entity(&self) -> &str {
        &self.full[..self.split]
    }

    pub fn id(&self) -> &str {
        &self.full[self.split + 1..]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl FromStr for CacheKey {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
