//! Account data models and DTOs.
//!
//! This module contains all data structures related to account management.
//!
//! # Core Types
//!
//! - [`User`] - Internal account record as stored, including the password
//!   digest and the currently valid refresh token
//! - [`UserProfile`] - Public projection of an account; the only shape ever
//!   returned to clients
//! - [`NewUser`] - Insert payload for account creation
//!
//! # Request DTOs
//!
//! - [`UpdateDetailsRequest`] - Update full name and/or email
//! - [`ChangePasswordRequest`] - Change the account password
//!
//! The `password` and `refresh_token` fields never leave the storage and
//! session layers; every handler converts to [`UserProfile`] via
//! [`User::into_profile`] before building a response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{RE_FULL_NAME, validate_password_strength};

/// An account as stored. Internal only: carries the password digest and the
/// single currently valid refresh token.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Public projection: everything except the password digest and the
    /// stored refresh token.
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            avatar: self.avatar,
            cover_image: self.cover_image,
            created_at: self.created_at,
        }
    }
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for account creation. `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
}

/// DTO for updating account details. At least one field must be present;
/// the handler rejects an empty patch.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailsRequest {
    #[validate(
        length(min = 3, message = "Name is too short"),
        regex(path = *RE_FULL_NAME, message = "Name can only contain letters and spaces")
    )]
    pub full_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

/// DTO for changing the account password.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    #[validate(
        length(min = 8, max = 128, message = "Password must contain at least 8 characters"),
        custom(function = validate_password_strength)
    )]
    pub new_password: String,
}

/// One watch-history item, newest first in listings.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntry {
    pub video_id: Uuid,
    pub title: String,
    pub thumbnail: Option<String>,
    pub watched_at: DateTime<Utc>,
}
