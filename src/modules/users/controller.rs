use axum::Json;
use axum::extract::{Multipart, State};

use vidstream_core::{ApiResponse, AppError};

use crate::middleware::auth::CurrentUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::uploads::{UploadedImage, read_image_field};
use crate::validator::ValidatedJson;

use super::model::{
    ChangePasswordRequest, UpdateDetailsRequest, UserProfile, WatchHistoryEntry,
};
use super::service::UserService;

/// Get the current account
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current account", body = UserProfile),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let profile = UserService::current_user(state.store.as_ref(), profile.id).await?;
    Ok(Json(ApiResponse::new(profile, "Success")))
}

/// Update account details
///
/// At least one of `fullName` or `email` must be present.
#[utoipa::path(
    patch,
    path = "/api/users/me",
    request_body = UpdateDetailsRequest,
    responses(
        (status = 200, description = "Account updated", body = UserProfile),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_details(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    ValidatedJson(request): ValidatedJson<UpdateDetailsRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let profile = UserService::update_details(state.store.as_ref(), profile.id, request).await?;
    Ok(Json(ApiResponse::new(profile, "User Updated Successfully")))
}

/// Change the account password
#[utoipa::path(
    post,
    path = "/api/users/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Incorrect old password", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    UserService::change_password(state.store.as_ref(), profile.id, request).await?;
    Ok(Json(ApiResponse::message("Password Changed Successfully")))
}

/// Replace the account avatar
#[utoipa::path(
    patch,
    path = "/api/users/avatar",
    responses(
        (status = 200, description = "Avatar updated", body = UserProfile),
        (status = 400, description = "Missing or invalid file", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_avatar(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let image = read_single_image(&state, multipart, "avatar")
        .await?
        .ok_or_else(|| AppError::validation("Avatar file is missing", vec![]))?;

    let profile =
        UserService::update_avatar(state.store.as_ref(), state.media.as_ref(), &profile, image)
            .await?;
    Ok(Json(ApiResponse::new(profile, "Avatar Updated Successfully")))
}

/// Replace the account cover image
#[utoipa::path(
    patch,
    path = "/api/users/cover-image",
    responses(
        (status = 200, description = "Cover image updated", body = UserProfile),
        (status = 400, description = "Missing or invalid file", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_cover_image(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let image = read_single_image(&state, multipart, "coverImage")
        .await?
        .ok_or_else(|| AppError::validation("Cover Image file is missing", vec![]))?;

    let profile = UserService::update_cover_image(
        state.store.as_ref(),
        state.media.as_ref(),
        &profile,
        image,
    )
    .await?;
    Ok(Json(ApiResponse::new(profile, "Cover Image Updated Successfully")))
}

/// Get the account's watch history
#[utoipa::path(
    get,
    path = "/api/users/history",
    responses(
        (status = 200, description = "Watch history, most recent first", body = Vec<WatchHistoryEntry>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_watch_history(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
) -> Result<Json<ApiResponse<Vec<WatchHistoryEntry>>>, AppError> {
    let history = UserService::watch_history(state.store.as_ref(), profile.id).await?;
    Ok(Json(ApiResponse::new(history, "Success")))
}

/// Pull the named file part out of a single-file multipart body.
async fn read_single_image(
    state: &AppState,
    mut multipart: Multipart,
    name: &str,
) -> Result<Option<UploadedImage>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::validation("Invalid multipart body", vec![]))?
    {
        if field.name() == Some(name) {
            return Ok(Some(
                read_image_field(field, state.media_config.max_upload_bytes).await?,
            ));
        }
    }
    Ok(None)
}
