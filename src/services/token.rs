//! Session token signing
//!
//! Tokens are compact HS256 JWS strings (`header.payload.signature`, each part
//! base64url without padding). They are never stored: verification checks the
//! HMAC-SHA256 signature against the shared secret and the `exp` claim, and
//! nothing else. There is no revocation.

use chrono::Utc;
use data_encoding::BASE64URL_NOPAD;
use hmac::{Hmac, Mac};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::Sha256;

use crate::models::TokenClaims;

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime in seconds (1 hour)
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

const ALGORITHM: &str = "HS256";

/// Error types for token verification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Not three dot-separated base64url/JSON parts
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Header names an algorithm other than HS256
    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature does not match the payload
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token is past its expiry instant
    #[error("Token expired")]
    Expired,

    /// Secret was rejected as an HMAC key
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenHeader {
    alg: String,
    #[serde(default)]
    typ: Option<String>,
}

/// Issues and verifies session tokens with a fixed shared secret
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl_seconds: i64,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Create a signer with the default one-hour lifetime
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self::with_ttl(secret, DEFAULT_TOKEN_TTL_SECONDS)
    }

    /// Create a signer with a custom token lifetime
    pub fn with_ttl(secret: impl AsRef<[u8]>, ttl_seconds: i64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl_seconds,
        }
    }

    /// Issue a token for `username`, valid from now for the configured lifetime
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        self.issue_at(username, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds)
    ///
    /// An expiry past the end of the timestamp range is clamped to it.
    pub fn issue_at(&self, username: &str, now: i64) -> Result<String, TokenError> {
        let claims = TokenClaims {
            username: username.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
        };
        let header = TokenHeader {
            alg: ALGORITHM.to_string(),
            typ: Some("JWT".to_string()),
        };

        // Serializing these two plain structs cannot fail.
        let header_part = encode_part(&serde_json::to_vec(&header).unwrap_or_default());
        let payload_part = encode_part(&serde_json::to_vec(&claims).unwrap_or_default());
        let signing_input = format!("{}.{}", header_part, payload_part);
        let signature = encode_part(&self.sign(signing_input.as_bytes())?);

        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (unix seconds)
    pub fn verify_at(&self, token: &str, now: i64) -> Result<TokenClaims, TokenError> {
        let mut parts = token.split('.');
        let (header_part, payload_part, signature_part) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(p), Some(s), None) => (h, p, s),
                _ => return Err(TokenError::Malformed("expected three parts".to_string())),
            };

        let header: TokenHeader = decode_json(header_part)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let signature = decode_part(signature_part)?;
        let mut mac = self.mac()?;
        mac.update(header_part.as_bytes());
        mac.update(b".");
        mac.update(payload_part.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let claims: TokenClaims = decode_json(payload_part)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        match HmacSha256::new_from_slice(&self.secret) {
            Ok(mac) => Ok(mac),
            Err(e) => Err(TokenError::InvalidKey(e.to_string())),
        }
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, TokenError> {
        let mut mac = self.mac()?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn encode_part(bytes: &[u8]) -> String {
    BASE64URL_NOPAD.encode(bytes)
}

fn decode_part(part: &str) -> Result<Vec<u8>, TokenError> {
    BASE64URL_NOPAD
        .decode(part.as_bytes())
        .map_err(|e| TokenError::Malformed(e.to_string()))
}

fn decode_json<T: DeserializeOwned>(part: &str) -> Result<T, TokenError> {
    let bytes = decode_part(part)?;
    serde_json::from_slice(&bytes).map_err(|e| TokenError::Malformed(e.to_string()))
}
