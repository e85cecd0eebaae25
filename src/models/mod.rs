//! Data models
//!
//! This module contains the data structures used throughout Stockroom:
//! - Catalog entities (Product) and their write payloads
//! - Session types (static credentials, token claims)

mod product;
mod session;

pub use product::{Product, ProductFields};
pub use session::{Credential, TokenClaims};
