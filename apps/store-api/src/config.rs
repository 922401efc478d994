//! Configuration for the Storefront API

use axum_helpers::auth::AuthConfig;
use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
///
/// Composes the shared config components; everything is loaded once at
/// startup and injected, never read from ambient globals later.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub environment: Environment,
    /// Allowed CORS origins; empty means permissive (development only)
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let auth = AuthConfig::from_env()?;

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGIN")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            auth,
            environment,
            cors_allowed_origins,
        })
    }
}
