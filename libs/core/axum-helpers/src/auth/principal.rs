use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated user resolved from a valid session token.
///
/// Inserted into request extensions by the authentication middleware;
/// handlers and the role gate read it from there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// User ID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// User email
    pub email: String,
    /// User role, as the closed role enum's string form
    pub role: String,
}

impl Principal {
    pub fn new(id: Uuid, name: String, email: String, role: String) -> Self {
        Self {
            id,
            name,
            email,
            role,
        }
    }

    /// Check if the principal has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Check if the principal is an admin
    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }
}

/// Role authorization middleware.
///
/// Must run after the authentication middleware that inserts the
/// [`Principal`] extension; a missing principal is treated as
/// unauthenticated (401), a principal outside the allowed set as
/// forbidden (403).
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, Router};
/// use axum_helpers::auth::authorize_roles;
///
/// let admin_routes = Router::new()
///     .route("/product/new", post(create_product))
///     .layer(middleware::from_fn_with_state(
///         &["admin"][..],
///         authorize_roles,
///     ));
/// ```
pub async fn authorize_roles(
    State(allowed): State<&'static [&'static str]>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = request.extensions().get::<Principal>().ok_or_else(|| {
        AppError::Unauthorized("Please login to access this resource".to_string())
    })?;

    if !allowed.contains(&principal.role.as_str()) {
        return Err(AppError::Forbidden(format!(
            "Role '{}' is not allowed to access this resource",
            principal.role
        )));
    }

    Ok(next.run(request).await)
}
