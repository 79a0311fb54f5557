//! Session cookie transport binding.
//!
//! Both tokens travel as `HttpOnly` cookies; the access token may also arrive
//! as a bearer header. Clear operations build the cookie with the same
//! attributes used when setting it, so removal always matches.

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, SameSite};

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Session cookie: `HttpOnly`, `Path=/`, `SameSite=Lax`; `Secure` only in
/// production-like environments.
pub fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie with the same attributes as [`session_cookie`], used for removal.
pub fn clear_session_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    session_cookie(name, String::new(), secure)
}

/// Access-token fallback: `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
