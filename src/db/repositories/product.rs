//! Product repository
//!
//! Storage for the product catalog.
//!
//! This module provides:
//! - `ProductRepository` trait defining the interface for product data access
//! - `InMemoryProductRepository` keeping products in process memory
//!
//! The in-memory repository owns both the product list and the id counter.
//! Every operation takes the single lock for its whole read-check-write
//! sequence, so concurrent creates never share an id and concurrent updates
//! and deletes on one product never interleave.

use crate::models::{Product, ProductFields};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Product repository trait
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in insertion order
    async fn list(&self) -> Vec<Product>;

    /// Store a new product under a freshly assigned id
    async fn create(&self, fields: ProductFields) -> Product;

    /// Merge `fields` over the product with the given id.
    ///
    /// Returns `None` if no such product exists.
    async fn update(&self, id: i64, fields: ProductFields) -> Option<Product>;

    /// Remove the product with the given id.
    ///
    /// Returns `false` if no such product existed.
    async fn delete(&self, id: i64) -> bool;
}

/// Collection and id counter, always locked together
#[derive(Debug)]
struct Catalog {
    products: Vec<Product>,
    next_id: i64,
}

/// Volatile product repository; contents are lost on restart
#[derive(Debug)]
pub struct InMemoryProductRepository {
    catalog: Mutex<Catalog>,
}

impl InMemoryProductRepository {
    /// Create an empty repository whose first id is 1
    pub fn new() -> Self {
        Self {
            catalog: Mutex::new(Catalog {
                products: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed() -> Arc<dyn ProductRepository> {
        Arc::new(Self::new())
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Vec<Product> {
        self.catalog.lock().await.products.clone()
    }

    async fn create(&self, fields: ProductFields) -> Product {
        let mut catalog = self.catalog.lock().await;
        let id = catalog.next_id;
        catalog.next_id += 1;

        let product = Product::new(id, fields);
        catalog.products.push(product.clone());
        product
    }

    async fn update(&self, id: i64, fields: ProductFields) -> Option<Product> {
        let mut catalog = self.catalog.lock().await;
        let product = catalog.products.iter_mut().find(|p| p.id == id)?;
        product.apply(fields);
        Some(product.clone())
    }

    async fn delete(&self, id: i64) -> bool {
        let mut catalog = self.catalog.lock().await;
        let before = catalog.products.len();
        catalog.products.retain(|p| p.id != id);
        catalog.products.len() != before
    }
}
