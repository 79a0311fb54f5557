use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use vidstream_core::{ApiResponse, AppError};

use crate::middleware::auth::CurrentUser;
use crate::modules::users::model::UserProfile;
use crate::state::AppState;
use crate::utils::cookies::{
    ACCESS_COOKIE, REFRESH_COOKIE, clear_session_cookie, session_cookie,
};
use crate::utils::uploads::{UploadedImage, read_image_field};
use crate::validator::{ValidatedJson, validation_details};

use super::model::{LoginRequest, RegisterRequest};
use super::service::AuthService;

/// Error body shape, for the OpenAPI docs.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
}

/// Register a new account
///
/// Multipart form: text fields `username`, `email`, `fullName`, `password`,
/// a required `avatar` image, and an optional `coverImage` image.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body(content = RegisterRequest, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Account created", body = UserProfile),
        (status = 400, description = "Validation error or missing avatar", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register_user(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), AppError> {
    let mut form = RegisterRequest::default();
    let mut avatar: Option<UploadedImage> = None;
    let mut cover_image: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::validation("Invalid multipart body", vec![]))?
    {
        match field.name() {
            Some("username") => form.username = read_text_field(field).await?,
            Some("email") => form.email = read_text_field(field).await?,
            Some("fullName") => form.full_name = read_text_field(field).await?,
            Some("password") => form.password = read_text_field(field).await?,
            Some("avatar") => {
                avatar =
                    Some(read_image_field(field, state.media_config.max_upload_bytes).await?);
            }
            Some("coverImage") => {
                cover_image =
                    Some(read_image_field(field, state.media_config.max_upload_bytes).await?);
            }
            _ => {}
        }
    }

    trim_in_place(&mut form);
    form.validate()
        .map_err(|errors| AppError::validation("Validation Error", validation_details(&errors)))?;

    let profile = AuthService::register(
        state.store.as_ref(),
        state.media.as_ref(),
        form,
        avatar,
        cover_image,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(profile, "User Created Successfully")),
    ))
}

/// Log in with username or email
///
/// On success both session cookies are set and the account profile is
/// returned.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserProfile),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unknown account or incorrect password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<UserProfile>>), AppError> {
    let (profile, tokens) =
        AuthService::login(state.store.as_ref(), request, &state.jwt_config).await?;

    let secure = state.server_config.environment.is_production();
    let jar = jar
        .add(session_cookie(ACCESS_COOKIE, tokens.access_token, secure))
        .add(session_cookie(REFRESH_COOKIE, tokens.refresh_token, secure));

    Ok((jar, Json(ApiResponse::new(profile, "Login Successful"))))
}

/// Log out the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn logout_user(
    State(state): State<AppState>,
    jar: CookieJar,
    CurrentUser(profile): CurrentUser,
) -> Result<(CookieJar, Json<ApiResponse<()>>), AppError> {
    AuthService::logout(state.store.as_ref(), profile.id).await?;

    let secure = state.server_config.environment.is_production();
    let jar = jar
        .remove(clear_session_cookie(ACCESS_COOKIE, secure))
        .remove(clear_session_cookie(REFRESH_COOKIE, secure));

    Ok((jar, Json(ApiResponse::message("Logout Successful"))))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|_| AppError::validation("Invalid multipart body", vec![]))
}

fn trim_in_place(form: &mut RegisterRequest) {
    form.username = form.username.trim().to_string();
    form.email = form.email.trim().to_string();
    form.full_name = form.full_name.trim().to_string();
    form.password = form.password.trim().to_string();
}
