//! Session model

use serde::{Deserialize, Serialize};

/// A statically configured login pair.
///
/// Passwords are stored and compared in plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exact match on both fields
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Claims embedded in a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Authenticated identity
    pub username: String,
    /// Issued-at, unix seconds
    pub iat: i64,
    /// Expiration, unix seconds
    pub exp: i64,
}

impl TokenClaims {
    /// A token is expired from its expiry instant onward
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}
