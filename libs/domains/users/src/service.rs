use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{RegisterRequest, Role, User, UserResponse};
use crate::repository::UserRepository;

/// Service layer for user business logic: registration, credential
/// verification and profile reads.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    // Verified against when a login names an unknown email, so the
    // not-found path does the same argon2 work as the found path.
    dummy_hash: String,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        let dummy_hash = Self::hash_password("timing-equalizer-dummy").unwrap_or_default();
        Self {
            repository: Arc::new(repository),
            dummy_hash,
        }
    }

    /// Register a new user with a hashed password
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<UserResponse> {
        let email = input.email.to_lowercase();

        if self.repository.email_exists(&email).await? {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = Self::hash_password(&input.password)?;

        let user = User::new(
            input.name,
            email,
            password_hash,
            input.phone,
            input.address,
            input.role.unwrap_or(Role::User),
        );

        let created = self.repository.create(user).await?;
        Ok(created.into())
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    /// Verify user credentials (for login)
    ///
    /// Unknown email and wrong password both return
    /// `UserError::InvalidCredentials`; the unknown-email path still
    /// runs an argon2 verification against a dummy hash.
    #[instrument(skip(self, email, password))]
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> UserResult<UserResponse> {
        let user = match self.repository.get_by_email(email).await? {
            Some(user) => user,
            None => {
                let _ = Self::verify_password(password, &self.dummy_hash);
                return Err(UserError::InvalidCredentials);
            }
        };

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user.into())
    }

    // Password helpers

    fn hash_password(password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            dummy_hash: self.dummy_hash.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;

    fn register_input(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "A".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            phone: "123".to_string(),
            address: "1 Main St".to_string(),
            role: None,
        }
    }

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = service();
        let user = service.register(register_input("a@x.com")).await.unwrap();

        let stored = service
            .repository
            .get_by_id(user.id)
            .await
            .unwrap()
            .unwrap();

        assert_ne!(stored.password_hash, "secret1");
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_then_login_succeeds() {
        let service = service();
        service.register(register_input("a@x.com")).await.unwrap();

        let user = service
            .verify_credentials("a@x.com", "secret1")
            .await
            .unwrap();
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails() {
        let service = service();
        service.register(register_input("a@x.com")).await.unwrap();

        let result = service.register(register_input("A@X.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_register_defaults_role_to_user() {
        let service = service();
        let user = service.register(register_input("a@x.com")).await.unwrap();
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_login_with_differently_cased_email() {
        let service = service();
        service
            .register(register_input("Mixed@Case.com"))
            .await
            .unwrap();

        let user = service
            .verify_credentials("mixed@case.com", "secret1")
            .await
            .unwrap();
        assert_eq!(user.email, "mixed@case.com");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let service = service();
        service.register(register_input("a@x.com")).await.unwrap();

        let wrong_password = service
            .verify_credentials("a@x.com", "wrong-password")
            .await
            .unwrap_err();
        let unknown_email = service
            .verify_credentials("ghost@x.com", "secret1")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, UserError::InvalidCredentials));
        assert!(matches!(unknown_email, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let service = service();
        let result = service.get_user(Uuid::now_v7()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_registered_user_response_never_contains_password() {
        let service = service();
        let user = service.register(register_input("a@x.com")).await.unwrap();

        let json = serde_json::to_value(&user).unwrap();
        for key in json.as_object().unwrap().keys() {
            assert!(!key.to_lowercase().contains("password"), "leaked: {}", key);
        }
    }
}
