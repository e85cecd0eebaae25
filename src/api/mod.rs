//! API layer - HTTP handlers and routing
//!
//! This module contains the HTTP API endpoints for Stockroom:
//! - Login endpoint (public)
//! - Product endpoints (guarded by a session token)

pub mod auth;
pub mod middleware;
pub mod products;

use axum::{
    http::{header, header::InvalidHeaderValue, HeaderValue, Method},
    middleware as axum_middleware, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{extract_bearer_token, ApiError, AppState, AuthenticatedUser};

/// Build the API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Every product route needs a valid session token
    let protected_routes = products::router().route_layer(
        axum_middleware::from_fn_with_state(state, middleware::require_auth),
    );

    Router::new().merge(auth::router()).merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router, InvalidHeaderValue> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(build_api_router(state.clone())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
