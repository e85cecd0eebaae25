//! Product API endpoints
//!
//! Handles HTTP requests for catalog management (all require a session token):
//! - GET /products - List products
//! - POST /products - Create product
//! - PUT /products/{id} - Full update
//! - PATCH /products/{id} - Partial update
//! - DELETE /products/{id} - Delete product

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::{Product, ProductFields};

/// Build the products router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            axum::routing::put(replace_product)
                .patch(patch_product)
                .delete(delete_product),
        )
}

/// A path id that is not an integer can name no product
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("Product not found: {}", raw)))
}

/// GET /products
async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.product_service.list().await)
}

/// POST /products
async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<ProductFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(fields) = payload?;
    tracing::debug!(user = %user.0, "create product");

    let product = state.product_service.create(fields).await;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/{id}
async fn replace_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<Json<ProductFields>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let Json(fields) = payload?;
    tracing::debug!(user = %user.0, id, "replace product");

    Ok(Json(state.product_service.replace(id, fields).await?))
}

/// PATCH /products/{id}
async fn patch_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<Json<ProductFields>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let Json(fields) = payload?;
    tracing::debug!(user = %user.0, id, "patch product");

    Ok(Json(state.product_service.patch(id, fields).await?))
}

/// DELETE /products/{id}
async fn delete_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    tracing::debug!(user = %user.0, id, "delete product");

    state.product_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
