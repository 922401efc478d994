//! Products API routes
//!
//! Public catalog reads plus the admin mutations mounted behind the
//! access guard with an admin-only role gate.

use axum::{middleware, Router};
use axum_helpers::auth::authorize_roles;
use domain_products::{handlers, MongoProductRepository, ProductService};
use domain_users::{authenticate, AuthGuard, MongoUserRepository, UserService};

use crate::state::AppState;

/// Create the products router
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository);

    // The guard resolves principals against the user store
    let users = UserService::new(MongoUserRepository::new(&state.db));
    let guard = AuthGuard::new(users, state.tokens.clone());

    let admin = handlers::admin_router(service.clone())
        .layer(middleware::from_fn_with_state(
            &["admin"][..],
            authorize_roles,
        ))
        .layer(middleware::from_fn_with_state(
            guard,
            authenticate::<MongoUserRepository>,
        ));

    handlers::public_router(service).nest("/admin", admin)
}

/// Initialize product indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
