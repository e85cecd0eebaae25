//! Stockroom - A small token-guarded product catalog

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockroom::{
    api::{self, AppState},
    config::Config,
    db::repositories::InMemoryProductRepository,
    services::{AuthService, ProductService, TokenSigner},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockroom=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Stockroom...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!(
        credentials = config.auth.credentials.len(),
        token_ttl_seconds = config.auth.token_ttl_seconds,
        "Configuration loaded"
    );

    // Catalog lives in memory only and starts empty
    let product_service = Arc::new(ProductService::new(InMemoryProductRepository::boxed()));

    let signer = TokenSigner::with_ttl(&config.auth.secret, config.auth.token_ttl_seconds);
    let auth_service = Arc::new(AuthService::new(config.auth.credentials.clone(), signer));

    let state = AppState {
        auth_service,
        product_service,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin)?;

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
