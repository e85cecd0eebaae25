//! Repositories
//!
//! Repository pattern implementations for data access.
//! Each repository handles CRUD operations for a specific entity.

pub mod product;

pub use product::{InMemoryProductRepository, ProductRepository};
