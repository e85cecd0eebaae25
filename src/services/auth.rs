//! Authentication service
//!
//! Implements login and token verification:
//! - `authenticate` checks a username/password pair against the static
//!   credential set and issues a signed session token
//! - `authorize` verifies a presented token and yields the embedded identity
//!
//! Credentials are compared in plain text with simple equality. There is no
//! lockout, rate limiting or signup; the credential set never changes while
//! the process runs.

use crate::models::Credential;
use crate::services::token::{TokenError, TokenSigner};

/// Error types for authentication operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthServiceError {
    /// Username/password pair matched no configured credential
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No token was presented
    #[error("Missing authentication token")]
    Unauthenticated,

    /// A token was presented but is malformed, forged or expired
    #[error("Invalid or expired token: {0}")]
    Forbidden(#[from] TokenError),

    /// The session token could not be signed
    #[error("Failed to issue session token: {0}")]
    Signing(TokenError),
}

/// Login input
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Session issued on successful login
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub username: String,
}

/// Authentication service over a fixed credential set
#[derive(Debug)]
pub struct AuthService {
    credentials: Vec<Credential>,
    signer: TokenSigner,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(credentials: Vec<Credential>, signer: TokenSigner) -> Self {
        Self {
            credentials,
            signer,
        }
    }

    /// Validate credentials and issue a session token.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` if no configured pair matches both fields exactly
    pub fn authenticate(&self, input: LoginInput) -> Result<IssuedToken, AuthServiceError> {
        let known = self
            .credentials
            .iter()
            .any(|c| c.matches(&input.username, &input.password));

        if !known {
            tracing::debug!(username = %input.username, "login rejected");
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self
            .signer
            .issue(&input.username)
            .map_err(AuthServiceError::Signing)?;
        tracing::info!(username = %input.username, "session token issued");

        Ok(IssuedToken {
            token,
            username: input.username,
        })
    }

    /// Verify a presented token and return the authenticated identity.
    ///
    /// `None` means no token was presented.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if `token` is `None`
    /// - `Forbidden` if the token fails signature, format or expiry checks
    pub fn authorize(&self, token: Option<&str>) -> Result<String, AuthServiceError> {
        let token = token.ok_or(AuthServiceError::Unauthenticated)?;
        let claims = self.signer.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            AuthServiceError::Forbidden(e)
        })?;
        Ok(claims.username)
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }
}
