//! API routes module
//!
//! This module wires the domain routers to HTTP routes.

pub mod auth;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    let v1 = Router::new()
        .nest("/auth", auth::router(state))
        .merge(products::router(state));

    Router::new().nest("/v1", v1)
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    auth::init_indexes(state).await?;
    products::init_indexes(state).await?;
    Ok(())
}
