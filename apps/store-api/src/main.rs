//! Storefront API - REST server for authentication and product catalog

use axum_helpers::auth::TokenService;
use axum_helpers::http::{create_cors_layer, create_permissive_cors_layer};
use axum_helpers::server::{create_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    // Connect to MongoDB with retry
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    // Get the database
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    // Stateless session tokens, signed with the configured secret
    let tokens = TokenService::new(&config.auth);

    // Initialize the application state
    let state = AppState {
        config,
        mongo_client,
        db,
        tokens,
    };

    // Initialize indexes (unique email, product listing indexes)
    api::init_indexes(&state).await?;

    // Per-IP rate limiting at the /api boundary: sustained 1 request
    // per 9 seconds with a burst of 100 (~100 requests / 15 minutes)
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(9)
            .burst_size(100)
            .finish()
            .ok_or_else(|| eyre::eyre!("Invalid rate limiter configuration"))?,
    );

    // Build router with API routes
    let api_routes = api::routes(&state).layer(GovernorLayer::new(governor_config));

    // CORS from configuration; permissive only when no origins are set
    let cors = if state.config.cors_allowed_origins.is_empty() {
        info!("CORS_ALLOWED_ORIGIN not set, using permissive CORS (development only)");
        create_permissive_cors_layer()
    } else {
        create_cors_layer(&state.config.cors_allowed_origins).map_err(|e| eyre::eyre!(e))?
    };

    // Create a router with OpenAPI docs and common middleware
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, cors);

    // Merge health endpoint
    let app = router.merge(health_router(state.config.app.clone()));

    info!(
        "Starting Storefront API on {} in {:?} mode",
        state.config.server.address(),
        state.config.environment
    );

    // Run server with graceful shutdown
    create_app(app, &state.config.server).await?;

    info!("Shutting down: closing MongoDB connections");
    drop(state.mongo_client);

    info!("Storefront API shutdown complete");
    Ok(())
}
