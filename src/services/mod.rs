//! Services layer - Business logic
//!
//! This module contains the business logic services for Stockroom.
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating with repositories
//! - Reporting typed errors for the API layer to map

pub mod auth;
pub mod product;
pub mod token;

pub use auth::{AuthService, AuthServiceError, IssuedToken, LoginInput};
pub use product::{ProductService, ProductServiceError};
pub use token::{TokenError, TokenSigner, DEFAULT_TOKEN_TTL_SECONDS};
