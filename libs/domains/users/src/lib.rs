//! Users Domain
//!
//! User accounts, credential verification and the access guard for
//! protected routes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (register/login/logout/me)
//! └──────┬──────┘
//!        │            ┌──────────────┐
//! ┌──────▼──────┐     │ Access guard │  ← token → Principal middleware
//! │   Service   │◄────┴──────────────┘
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB/in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, role enum
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::auth::{AuthConfig, TokenService};
//! use domain_users::{
//!     auth_handlers::{auth_router, AuthState},
//!     guard::AuthGuard,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//! };
//!
//! let config = AuthConfig::new("a-32-byte-minimum-development-secret!");
//! let service = UserService::new(InMemoryUserRepository::new());
//! let tokens = TokenService::new(&config);
//!
//! let state = AuthState::new(service.clone(), tokens.clone(), &config, false);
//! let guard = AuthGuard::new(service, tokens);
//! let router = auth_router(state, guard);
//! ```

pub mod auth_handlers;
pub mod error;
pub mod guard;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use auth_handlers::{auth_router, AuthState};
pub use error::{UserError, UserResult};
pub use guard::{authenticate, AuthGuard};
pub use models::{LoginRequest, RegisterRequest, Role, User, UserResponse};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
