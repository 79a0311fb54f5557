use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::validation::{RE_FULL_NAME, RE_USERNAME, validate_password_strength};

/// Text fields of the registration form. Collected from the multipart body
/// and validated as a unit before any media is published.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 30, message = "Username must be between 3 and 30 characters"),
        regex(
            path = *RE_USERNAME,
            message = "Username can only contain letters, numbers, underscores, and hyphens"
        )
    )]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(
        length(min = 3, message = "Name is too short"),
        regex(path = *RE_FULL_NAME, message = "Name can only contain letters and spaces")
    )]
    pub full_name: String,
    #[validate(
        length(min = 8, max = 128, message = "Password must contain at least 8 characters"),
        custom(function = validate_password_strength)
    )]
    pub password: String,
}

/// Login request. One of `username` or `email` must be present.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
