//! HTTP handlers for the authentication flow.
//!
//! Registration and login issue a signed session token, return it in
//! the response body and set it as an HTTP-only cookie. Logout
//! overwrites the cookie with an expired empty value; there is no
//! server-side session state to clear.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_helpers::auth::{cookie, AuthConfig, Principal, TokenService};
use axum_helpers::ValidatedJson;

use crate::error::UserError;
use crate::guard::{authenticate, AuthGuard};
use crate::models::{
    AuthResponse, LoginRequest, MessageResponse, ProfileResponse, RegisterRequest,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Application state for auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub tokens: TokenService,
    pub cookie_expires_days: i64,
    pub secure_cookies: bool,
}

impl<R: UserRepository> AuthState<R> {
    /// `secure_cookies` should be true when running behind HTTPS
    /// (production); the cookie lifetime comes from [`AuthConfig`].
    pub fn new(
        service: UserService<R>,
        tokens: TokenService,
        config: &AuthConfig,
        secure_cookies: bool,
    ) -> Self {
        Self {
            service,
            tokens,
            cookie_expires_days: config.cookie_expires_days,
            secure_cookies,
        }
    }

    fn session_cookie_header(&self, token: &str) -> Result<HeaderValue, UserError> {
        HeaderValue::from_str(&cookie::session_cookie(
            token,
            self.cookie_expires_days,
            self.secure_cookies,
        ))
        .map_err(|e| UserError::Internal(format!("Failed to create cookie: {}", e)))
    }
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            tokens: self.tokens.clone(),
            cookie_expires_days: self.cookie_expires_days,
            secure_cookies: self.secure_cookies,
        }
    }
}

/// Register a new user
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<Response, UserError> {
    let user = state.service.register(input).await?;

    let token = state.tokens.issue(user.id).map_err(|e| {
        tracing::error!("Failed to issue token: {}", e);
        UserError::Internal("Failed to issue token".to_string())
    })?;

    let cookie_header = state.session_cookie_header(&token)?;

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(header::SET_COOKIE, cookie_header)]),
        Json(AuthResponse {
            success: true,
            token,
            user,
        }),
    )
        .into_response())
}

/// Login with email/password
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    Json(input): Json<LoginRequest>,
) -> Result<Response, UserError> {
    let (email, password) = match (input.email, input.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(UserError::MissingCredentials),
    };

    let user = state.service.verify_credentials(&email, &password).await?;

    let token = state.tokens.issue(user.id).map_err(|e| {
        tracing::error!("Failed to issue token: {}", e);
        UserError::Internal("Failed to issue token".to_string())
    })?;

    let cookie_header = state.session_cookie_header(&token)?;

    Ok((
        StatusCode::OK,
        AppendHeaders([(header::SET_COOKIE, cookie_header)]),
        Json(AuthResponse {
            success: true,
            token,
            user,
        }),
    )
        .into_response())
}

/// Logout: overwrite the session cookie with an expired empty value
async fn logout<R: UserRepository>(
    State(state): State<AuthState<R>>,
) -> Result<Response, UserError> {
    let cookie_header = HeaderValue::from_str(&cookie::expired_cookie(state.secure_cookies))
        .map_err(|e| UserError::Internal(format!("Failed to create cookie: {}", e)))?;

    Ok((
        StatusCode::OK,
        AppendHeaders([(header::SET_COOKIE, cookie_header)]),
        Json(MessageResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    )
        .into_response())
}

/// Get the currently authenticated user's profile
async fn me<R: UserRepository>(
    State(state): State<AuthState<R>>,
    principal: Option<Extension<Principal>>,
) -> Result<Json<ProfileResponse>, UserError> {
    let Extension(principal) = principal.ok_or(UserError::NotAuthenticated)?;

    let user = state.service.get_user(principal.id).await?;

    Ok(Json(ProfileResponse {
        success: true,
        user,
    }))
}

/// Create the auth router
///
/// `/me` runs behind the authentication guard; the other routes are
/// public.
pub fn auth_router<R>(state: AuthState<R>, guard: AuthGuard<R>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route("/register", post(register::<R>))
        .route("/login", post(login::<R>))
        .route("/logout", get(logout::<R>))
        .route(
            "/me",
            get(me::<R>).layer(middleware::from_fn_with_state(guard, authenticate::<R>)),
        )
        .with_state(state)
}
