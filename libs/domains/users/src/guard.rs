//! Access guard middleware.
//!
//! Verifies the session token from the request, resolves the referenced
//! user and attaches it as the request's [`Principal`]. Role checks are
//! layered separately with `axum_helpers::auth::authorize_roles`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_helpers::auth::{cookie, Principal, TokenService};

use crate::error::UserError;
use crate::repository::UserRepository;
use crate::service::UserService;

/// State for the authentication middleware
pub struct AuthGuard<R: UserRepository> {
    service: UserService<R>,
    tokens: TokenService,
}

impl<R: UserRepository> AuthGuard<R> {
    pub fn new(service: UserService<R>, tokens: TokenService) -> Self {
        Self { service, tokens }
    }
}

impl<R: UserRepository> Clone for AuthGuard<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

/// Authentication middleware.
///
/// Extracts the token from the session cookie (or Authorization
/// header), verifies it, resolves the user and inserts a [`Principal`]
/// into request extensions for downstream handlers. A missing, invalid
/// or expired token fails with 401 "Please login to access this
/// resource", as does a token whose user no longer exists.
pub async fn authenticate<R: UserRepository>(
    State(guard): State<AuthGuard<R>>,
    mut request: Request,
    next: Next,
) -> Result<Response, UserError> {
    let token = cookie::extract_token(request.headers()).ok_or(UserError::NotAuthenticated)?;

    let user_id = guard.tokens.verify(&token).map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        UserError::NotAuthenticated
    })?;

    let user = guard
        .service
        .get_user(user_id)
        .await
        .map_err(|_| UserError::NotAuthenticated)?;

    let principal = Principal::new(user.id, user.name, user.email, user.role.to_string());
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
