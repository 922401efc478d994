use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User roles
///
/// A closed enum: free-form role strings never reach authorization
/// checks. Anything but these two variants is rejected at
/// deserialization time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// User entity - represents a user stored in MongoDB
///
/// Serialization here is the persistence format, so the password hash
/// IS included. Nothing on the HTTP surface serializes `User` directly;
/// responses go through [`UserResponse`], which has no hash field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// User email (unique, stored lowercased)
    pub email: String,
    /// Argon2 password hash
    pub password_hash: String,
    /// Phone number
    pub phone: String,
    /// Postal address
    pub address: String,
    /// User role
    pub role: Role,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user (password must already be hashed by the service layer)
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        phone: String,
        address: String,
        role: Role,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            email: email.to_lowercase(),
            password_hash,
            phone,
            address,
            role,
            created_at: Utc::now(),
        }
    }
}

/// User response DTO (without the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// DTO for user registration
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub address: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// DTO for user login
///
/// Fields are optional so an incomplete body reaches the handler and
/// yields the documented "Please enter email & password" response
/// instead of a deserialization error.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response after successful login/register
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserResponse,
}

/// Response for the authenticated profile endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserResponse,
}

/// Simple confirmation response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}
