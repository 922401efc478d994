//! Shared Axum infrastructure for the storefront services.
//!
//! This crate provides the cross-cutting HTTP concerns used by the
//! domain crates and the API binary:
//!
//! - Uniform error responses ([`AppError`], [`ErrorResponse`])
//! - Request extractors with validation ([`ValidatedJson`], [`UuidPath`])
//! - Stateless session tokens ([`TokenService`]) and the authenticated
//!   request principal ([`Principal`])
//! - Session cookie helpers
//! - CORS / security-header layers
//! - Server bootstrap with graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export commonly used types
pub use auth::{
    authorize_roles, cookie, AuthConfig, Claims, Principal, TokenError, TokenService,
};
pub use errors::{AppError, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};
pub use server::{create_app, create_router, health_router, shutdown_signal};
