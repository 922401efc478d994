use super::config::AuthConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
///
/// The payload carries only the user id; name, email and role are
/// re-resolved from the store on every authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub iat: i64,    // Issued at
    pub exp: i64,    // Expiration time
}

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid or expired token")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("Token subject is not a valid user id")]
    BadSubject,
}

/// Stateless JWT session tokens (HS256).
///
/// Signing key and expiry are injected configuration; issuing and
/// verifying are pure computation with no side effects.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expires_days: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            expires_days: config.token_expires_days,
        }
    }

    /// Issue a signed token embedding the user id, valid for the
    /// configured number of days.
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(self.expires_days)).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify a token's signature and expiry, returning the embedded
    /// user id.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Uuid::parse_str(&token_data.claims.sub).map_err(|_| TokenError::BadSubject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-that-is-long-enough!!";

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::new(SECRET))
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let tokens = service();
        let user_id = Uuid::now_v7();

        let token = tokens.issue(user_id).unwrap();
        let verified = tokens.verify(&token).unwrap();

        assert_eq!(verified, user_id);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let tokens = service();
        assert!(tokens.verify("not-a-token").is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let tokens = service();
        let other = TokenService::new(&AuthConfig::new(
            "a-completely-different-32-char-secret!!!",
        ));

        let token = tokens.issue(Uuid::now_v7()).unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired() {
        let mut config = AuthConfig::new(SECRET);
        config.token_expires_days = -1; // already expired at issuance
        let tokens = TokenService::new(&config);

        let token = tokens.issue(Uuid::now_v7()).unwrap();
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let tokens = service();
        let mut token = tokens.issue(Uuid::now_v7()).unwrap();
        token.pop();
        token.push('x');

        assert!(tokens.verify(&token).is_err());
    }
}
