//! Middleware for request processing.
//!
//! # Authentication Flow
//!
//! 1. The client presents the access token as an `accessToken` cookie (or an
//!    `Authorization: Bearer` header).
//! 2. [`auth::require_auth`] verifies it and attaches the account's public
//!    projection to the request as [`auth::CurrentUser`].
//! 3. If the access token has merely expired, the middleware attempts a
//!    silent renewal from the `refreshToken` cookie before failing the
//!    request: a valid refresh token that matches the one stored on the
//!    account mints a fresh access token on the response.
//! 4. Handlers extract [`auth::CurrentUser`] to read the caller's identity.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::CurrentUser;
//!
//! async fn get_current_user(CurrentUser(profile): CurrentUser) -> impl IntoResponse {
//!     Json(profile)
//! }
//! ```

pub mod auth;
