//! API middleware
//!
//! Contains:
//! - Shared application state
//! - The JSON error envelope and its status mapping
//! - Authentication (bearer token extraction and verification)

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

use crate::services::{AuthService, AuthServiceError, ProductService, ProductServiceError};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub product_service: Arc<ProductService>,
}

/// Identity of the caller, inserted by `require_auth`
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new("INVALID_CREDENTIALS", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "INVALID_CREDENTIALS" | "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(e: AuthServiceError) -> Self {
        match e {
            AuthServiceError::InvalidCredentials => Self::invalid_credentials("Invalid credentials"),
            AuthServiceError::Unauthenticated => {
                Self::unauthorized("Missing authentication token")
            }
            AuthServiceError::Forbidden(_) => Self::forbidden("Invalid or expired token"),
            AuthServiceError::Signing(e) => {
                tracing::error!(error = %e, "failed to sign session token");
                Self::internal_error("Failed to issue session token")
            }
        }
    }
}

impl From<ProductServiceError> for ApiError {
    fn from(e: ProductServiceError) -> Self {
        match e {
            ProductServiceError::NotFound(_) => Self::not_found(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation_error(rejection.body_text())
    }
}

/// Extract the session token from the Authorization header.
///
/// The header value is split on a space and the second part is the token.
/// A missing header, a single-part value and an empty second part all mean
/// no token was supplied. The scheme word itself is not checked. Bytes that
/// are not UTF-8 are kept (lossily) so the token still fails verification.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    headers
        .get(header::AUTHORIZATION)?
        .as_bytes()
        .split(|byte| *byte == b' ')
        .nth(1)
        .filter(|token| !token.is_empty())
        .map(String::from_utf8_lossy)
}

/// Authentication middleware
///
/// Missing token is rejected with 401, a token that fails verification with
/// 403. On success the caller's identity is stored in request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers());
    let username = state.auth_service.authorize(token.as_deref())?;

    request.extensions_mut().insert(AuthenticatedUser(username));
    Ok(next.run(request).await)
}
