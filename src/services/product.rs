//! Product service
//!
//! Business operations over the catalog: list, create, replace (full update),
//! patch (partial update) and delete. Access control happens before these
//! are reached; the service itself trusts its caller.

use crate::db::repositories::ProductRepository;
use crate::models::{Product, ProductFields};
use std::sync::Arc;

/// Error types for product operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductServiceError {
    /// No product with the given id
    #[error("Product not found: {0}")]
    NotFound(i64),
}

pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// All products in insertion order
    pub async fn list(&self) -> Vec<Product> {
        self.repo.list().await
    }

    /// Append a new product; the payload is stored as given
    pub async fn create(&self, fields: ProductFields) -> Product {
        let product = self.repo.create(fields).await;
        tracing::info!(id = product.id, "product created");
        product
    }

    /// Full update: supplied fields are merged over the stored record
    pub async fn replace(
        &self,
        id: i64,
        fields: ProductFields,
    ) -> Result<Product, ProductServiceError> {
        let product = self
            .repo
            .update(id, fields)
            .await
            .ok_or(ProductServiceError::NotFound(id))?;
        tracing::info!(id, "product replaced");
        Ok(product)
    }

    /// Partial update: only supplied fields change
    pub async fn patch(
        &self,
        id: i64,
        fields: ProductFields,
    ) -> Result<Product, ProductServiceError> {
        let product = self
            .repo
            .update(id, fields)
            .await
            .ok_or(ProductServiceError::NotFound(id))?;
        tracing::info!(id, "product patched");
        Ok(product)
    }

    /// Remove a product. Deleting an unknown id reports `NotFound`.
    pub async fn delete(&self, id: i64) -> Result<(), ProductServiceError> {
        if !self.repo.delete(id).await {
            return Err(ProductServiceError::NotFound(id));
        }
        tracing::info!(id, "product deleted");
        Ok(())
    }
}
