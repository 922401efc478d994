//! Authentication configuration.
//!
//! Loaded through the `FromEnv` trait from `core_config`, following the
//! same pattern as `ServerConfig` and `MongoConfig`.

use core_config::{env_or_default, env_required, ConfigError, FromEnv};

/// Authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - signing key, at least 32 characters
/// - `JWT_EXPIRES_DAYS` (optional, default: 7) - token lifetime, in days
/// - `COOKIE_EXPIRES_DAYS` (optional, default: 7) - session cookie
///   Max-Age, in days
///
/// Both expiry knobs are expressed in DAYS. That unit is part of the
/// deployment contract; the cookie Max-Age is derived as
/// `days * 24 * 60 * 60` seconds.
///
/// # Example
///
/// ```ignore
/// use axum_helpers::AuthConfig;
/// use core_config::FromEnv;
///
/// // From environment variables
/// let config = AuthConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = AuthConfig::new("my-super-secret-key-that-is-at-least-32-chars");
/// ```
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    /// Token lifetime in days
    pub token_expires_days: i64,
    /// Session cookie Max-Age in days
    pub cookie_expires_days: i64,
}

impl AuthConfig {
    /// Create a new AuthConfig with the given secret and 7-day expiries.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            token_expires_days: 7,
            cookie_expires_days: 7,
        }
    }
}

impl FromEnv for AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let token_expires_days = env_or_default("JWT_EXPIRES_DAYS", "7").parse().map_err(
            |e| ConfigError::ParseError {
                key: "JWT_EXPIRES_DAYS".to_string(),
                details: format!("{}", e),
            },
        )?;

        let cookie_expires_days = env_or_default("COOKIE_EXPIRES_DAYS", "7").parse().map_err(
            |e| ConfigError::ParseError {
                key: "COOKIE_EXPIRES_DAYS".to_string(),
                details: format!("{}", e),
            },
        )?;

        Ok(Self {
            secret,
            token_expires_days,
            cookie_expires_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_auth_config_new_valid() {
        let config = AuthConfig::new(VALID_SECRET);
        assert_eq!(config.secret, VALID_SECRET);
        assert_eq!(config.token_expires_days, 7);
        assert_eq!(config.cookie_expires_days, 7);
    }

    #[test]
    #[should_panic(expected = "JWT secret must be at least 32 characters")]
    fn test_auth_config_new_too_short() {
        AuthConfig::new("short");
    }

    #[test]
    fn test_auth_config_from_env_valid() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(VALID_SECRET)),
                ("JWT_EXPIRES_DAYS", Some("3")),
                ("COOKIE_EXPIRES_DAYS", Some("5")),
            ],
            || {
                let config = AuthConfig::from_env().unwrap();
                assert_eq!(config.secret, VALID_SECRET);
                assert_eq!(config.token_expires_days, 3);
                assert_eq!(config.cookie_expires_days, 5);
            },
        );
    }

    #[test]
    fn test_auth_config_from_env_defaults_expiry() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(VALID_SECRET)),
                ("JWT_EXPIRES_DAYS", None),
                ("COOKIE_EXPIRES_DAYS", None),
            ],
            || {
                let config = AuthConfig::from_env().unwrap();
                assert_eq!(config.token_expires_days, 7);
                assert_eq!(config.cookie_expires_days, 7);
            },
        );
    }

    #[test]
    fn test_auth_config_from_env_missing_secret() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let config = AuthConfig::from_env();
            assert!(config.is_err());
            assert!(config.unwrap_err().to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_auth_config_from_env_short_secret() {
        temp_env::with_var("JWT_SECRET", Some("short"), || {
            let config = AuthConfig::from_env();
            assert!(config.is_err());
            assert!(config.unwrap_err().to_string().contains("32 characters"));
        });
    }

    #[test]
    fn test_auth_config_from_env_bad_expiry() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(VALID_SECRET)),
                ("JWT_EXPIRES_DAYS", Some("soon")),
            ],
            || {
                let config = AuthConfig::from_env();
                assert!(config.is_err());
            },
        );
    }
}
