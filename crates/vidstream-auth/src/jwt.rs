//! Token codec: signing and verification of session JWTs.
//!
//! All functions are pure with respect to the process-wide [`JwtConfig`]
//! injected by the caller; nothing here touches storage or global state.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use uuid::Uuid;

use vidstream_config::JwtConfig;
use vidstream_core::AppError;

use crate::claims::{AccessClaims, RefreshClaims};

/// Why a token failed verification.
///
/// `Expired` is the routine case an expired-but-otherwise-sound access token
/// hits during silent renewal; `Invalid` covers malformed tokens and bad
/// signatures, which callers handle more strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "token expired"),
            Self::Invalid => write!(f, "token invalid"),
        }
    }
}

impl std::error::Error for TokenError {}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    }
}

/// Creates a short-lived access token for the given account.
pub fn create_access_token(
    account_id: Uuid,
    username: &str,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + jwt_config.access_token_expiry).max(0) as usize;

    let claims = AccessClaims {
        sub: account_id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        exp,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create access token: {}", e)))
}

/// Creates a long-lived refresh token for the given account.
///
/// Each call produces a distinct token (fresh `jti`), so a newly issued
/// refresh token always supersedes the previous one by value.
pub fn create_refresh_token(account_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + jwt_config.refresh_token_expiry).max(0) as usize;

    let claims = RefreshClaims {
        sub: account_id.to_string(),
        exp,
        iat: now as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create refresh token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
pub fn verify_access_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<AccessClaims, TokenError> {
    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(classify)
}

/// Verifies a refresh token and returns the embedded claims.
pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshClaims, TokenError> {
    decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(classify)
}
