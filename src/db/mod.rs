//! Storage layer
//!
//! Stockroom keeps its catalog in process memory only. Nothing is written to
//! disk and every restart begins with an empty catalog.
//!
//! Storage sits behind the `ProductRepository` trait so services never touch
//! the underlying collection directly.
//!
//! # Usage
//!
//! ```ignore
//! use stockroom::db::repositories::InMemoryProductRepository;
//! use stockroom::services::ProductService;
//!
//! let repo = InMemoryProductRepository::boxed();
//! let service = ProductService::new(repo);
//! ```

pub mod repositories;
