//! Auth API routes
//!
//! Wires the users domain to HTTP routes: register, login, logout and
//! the authenticated profile endpoint.

use axum::Router;
use domain_users::{auth_router, AuthGuard, AuthState, MongoUserRepository, UserService};

use crate::state::AppState;

/// Create the auth router
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    let service = UserService::new(repository);

    let auth_state = AuthState::new(
        service.clone(),
        state.tokens.clone(),
        &state.config.auth,
        state.config.environment.use_https(),
    );
    let guard = AuthGuard::new(service, state.tokens.clone());

    auth_router(auth_state, guard)
}

/// Initialize user indexes (unique email)
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoUserRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
