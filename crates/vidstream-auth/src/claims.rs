//! JWT claim structures for session tokens.

use serde::{Deserialize, Serialize};

/// Claims embedded in access tokens.
///
/// Carries enough identity to serve a request without a second lookup for
/// display purposes; authorization still resolves the account from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Account ID (subject claim)
    pub sub: String,
    /// Account's username
    pub username: String,
    /// Account's email address
    pub email: String,
    /// Expiration timestamp (Unix seconds)
    pub exp: usize,
    /// Issued-at timestamp (Unix seconds)
    pub iat: usize,
}

/// Claims embedded in refresh tokens.
///
/// The `jti` makes every issuance distinct, so a superseded refresh token
/// never compares equal to the currently stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Account ID (subject claim)
    pub sub: String,
    /// Expiration timestamp (Unix seconds)
    pub exp: usize,
    /// Issued-at timestamp (Unix seconds)
    pub iat: usize,
    /// Unique token identifier (JWT ID)
    pub jti: String,
}
