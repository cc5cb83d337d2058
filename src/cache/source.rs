//! Source of Truth Module
//!
//! The authoritative data source contract and the simulated sources used by
//! the service binary.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::models::Product;

/// Authoritative source of product records.
///
/// Failures are reported as `CacheError::SourceUnavailable`.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Product>;
}

// == Simulated Database ==
/// Stand-in for the product database consulted on read misses.
#[derive(Debug, Default, Clone)]
pub struct SimulatedDatabase;

impl SimulatedDatabase {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DataSource for SimulatedDatabase {
    async fn fetch(&self, id: &str) -> Result<Product> {
        debug!(id, "querying product database");
        Ok(Product::new(id, format!("DB Product {}", id), 19.99))
    }
}

// == Catalog Source ==
/// Expensive recomputation of a product from the catalog, used by the
/// regeneration worker. Product ids must be integers.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    /// Simulated recomputation time
    delay: Duration,
}

impl CatalogSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl DataSource for CatalogSource {
    async fn fetch(&self, id: &str) -> Result<Product> {
        tokio::time::sleep(self.delay).await;

        let number: i64 = id.parse().map_err(|_| {
            CacheError::SourceUnavailable(format!("catalog has no numeric product '{}'", id))
        })?;

        Ok(Product::new(
            id,
            format!("Product {}", id),
            9.99 + number as f64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_database() {
        let product = SimulatedDatabase::new().fetch("42").await.unwrap();
        assert_eq!(product, Product::new("42", "DB Product 42", 19.99));
    }

    #[tokio::test]
    async fn test_catalog_prices_by_id() {
        let source = CatalogSource::new(Duration::ZERO);
        let product = source.fetch("7").await.unwrap();

        assert_eq!(product.name, "Product 7");
        assert!((product.price - 16.99).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_catalog_rejects_non_numeric_id() {
        let source = CatalogSource::new(Duration::ZERO);
        let result = source.fetch("widget").await;
        assert!(matches!(result, Err(CacheError::SourceUnavailable(_))));
    }
}
