//! Stateless session authentication.
//!
//! The token is the sole session artifact: a signed JWT carrying the
//! user id, issued at login/registration and transported as an
//! HTTP-only cookie. There is no server-side session store.

pub mod config;
pub mod cookie;
pub mod principal;
pub mod token;

pub use config::AuthConfig;
pub use principal::{authorize_roles, Principal};
pub use token::{Claims, TokenError, TokenService};
