//! External product enrichment.
//!
//! The dashboard never talks to merchants itself; whatever implements
//! [`ProductLookup`] (a scraper service, a catalog API, a fixture) is handed in
//! by the caller.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a successful lookup knows about a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub name: String,
    pub unit_price: f64,
    pub image_ref: String,
}

impl ProductDetails {
    pub fn new(name: impl Into<String>, unit_price: f64, image_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit_price,
            image_ref: image_ref.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("product not found")]
    NotFound,

    #[error("lookup unavailable: {0}")]
    Unavailable(String),

    #[error("lookup timed out after {0} ms")]
    TimedOut(u64),

    #[error("malformed product data: {0}")]
    Malformed(String),
}

/// Turns a product URL into product details.
///
/// Implementations may suspend (network-bound). They are called with at most
/// one outstanding request per cart.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn lookup(&self, source_url: &str) -> Result<ProductDetails, LookupError>;
}

/// In-memory catalog keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct StaticProductLookup {
    catalog: HashMap<String, ProductDetails>,
}

impl StaticProductLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, source_url: impl Into<String>, details: ProductDetails) -> Self {
        self.insert(source_url, details);
        self
    }

    pub fn insert(&mut self, source_url: impl Into<String>, details: ProductDetails) {
        self.catalog.insert(source_url.into(), details);
    }
}

#[async_trait]
impl ProductLookup for StaticProductLookup {
    async fn lookup(&self, source_url: &str) -> Result<ProductDetails, LookupError> {
        self.catalog
            .get(source_url.trim())
            .cloned()
            .ok_or(LookupError::NotFound)
    }
}

/// Lookup that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingProductLookup {
    error: LookupError,
}

impl FailingProductLookup {
    pub fn new(error: LookupError) -> Self {
        Self { error }
    }
}

impl Default for FailingProductLookup {
    fn default() -> Self {
        Self::new(LookupError::Unavailable("lookup service offline".to_string()))
    }
}

#[async_trait]
impl ProductLookup for FailingProductLookup {
    async fn lookup(&self, _source_url: &str) -> Result<ProductDetails, LookupError> {
        Err(self.error.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_lookup_finds_known_urls() {
        let lookup = StaticProductLookup::new().with_product(
            "https://shop.example/kettle",
            ProductDetails::new("Kettle", 29.0, "img/kettle.png"),
        );

        let details = lookup.lookup(" https://shop.example/kettle ").await.unwrap();
        assert_eq!(details.name, "Kettle");
        assert_eq!(
            lookup.lookup("https://shop.example/other").await,
            Err(LookupError::NotFound)
        );
    }

    #[tokio::test]
    async fn failing_lookup_always_fails() {
        let lookup = FailingProductLookup::new(LookupError::TimedOut(50));
        assert_eq!(
            lookup.lookup("https://x.com").await,
            Err(LookupError::TimedOut(50))
        );
    }
}
