//! Authentication API endpoints
//!
//! - POST /login - Exchange a username/password pair for a session token

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState};
use crate::services::LoginInput;

/// Request body for login
///
/// Missing fields are read as empty strings, which simply fail to match.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response for successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Build the auth router (no authentication required)
pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// POST /login - Issue a session token
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = body?;
    let issued = state
        .auth_service
        .authenticate(LoginInput::new(body.username, body.password))?;

    Ok(Json(LoginResponse {
        token: issued.token,
    }))
}
