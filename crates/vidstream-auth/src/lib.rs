//! # Vidstream Auth
//!
//! Token codec for the Vidstream session lifecycle.
//!
//! This crate provides:
//!
//! - [`claims`]: JWT claim structures for access and refresh tokens
//! - [`jwt`]: Token creation and verification utilities
//!
//! # Token Types
//!
//! Sessions use two independent signed artifacts:
//!
//! - **Access Token** ([`AccessClaims`]): short-lived, proves identity for one
//!   request window; stateless, never persisted server-side.
//! - **Refresh Token** ([`RefreshClaims`]): longer-lived, used solely to mint
//!   new access tokens. Exactly one is valid per account at a time; the
//!   currently valid value is stored on the account record.
//!
//! Verification failures are tagged: [`TokenError::Expired`] marks a routine
//! renewal opportunity, while [`TokenError::Invalid`] marks a token that could
//! not be parsed or whose signature did not validate. Callers treat the two
//! differently.
//!
//! # Example
//!
//! ```ignore
//! use vidstream_auth::{create_access_token, verify_access_token};
//! use vidstream_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "alice", "alice@example.com", &config)?;
//! let claims = verify_access_token(&token, &config)?;
//! assert_eq!(claims.username, "alice");
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{AccessClaims, RefreshClaims};
pub use jwt::{
    TokenError, create_access_token, create_refresh_token, verify_access_token,
    verify_refresh_token,
};
