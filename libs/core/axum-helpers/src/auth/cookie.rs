//! Session cookie helpers.
//!
//! The session token travels as a `token=` cookie: HttpOnly,
//! SameSite=Lax, Path=/, and Secure when running behind HTTPS.
//! Logout replaces it with an empty, already-expired value.

use axum::http::HeaderMap;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Build the Set-Cookie value for a fresh session.
///
/// `max_age_days` is the configured cookie lifetime in days.
pub fn session_cookie(token: &str, max_age_days: i64, secure: bool) -> String {
    let secure_flag = if secure { " Secure;" } else { "" };
    format!(
        "{}={}; HttpOnly;{} SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        token,
        secure_flag,
        max_age_days * 24 * 60 * 60
    )
}

/// Build the Set-Cookie value that clears the session (logout).
pub fn expired_cookie(secure: bool) -> String {
    let secure_flag = if secure { " Secure;" } else { "" };
    format!(
        "{}=; HttpOnly;{} SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE, secure_flag
    )
}

/// Extract a cookie value by name from a `Cookie:` header string.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
        if parts.len() == 2 && parts[0] == name {
            Some(parts[1].to_string())
        } else {
            None
        }
    })
}

/// Extract the session token from a request.
///
/// The session cookie is checked first, then an
/// `Authorization: Bearer` header as the equivalent transport.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| cookie_value(cookies, SESSION_COOKIE))
        .or_else(|| {
            headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        })
}
