use axum::Json;
use axum::extract::{Path, State};

use vidstream_core::{ApiResponse, AppError};

use crate::middleware::auth::CurrentUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

use super::model::ChannelProfile;
use super::service::ChannelService;

/// Get a channel profile by username
///
/// Includes subscriber counts and whether the requesting viewer subscribes
/// to the channel.
#[utoipa::path(
    get,
    path = "/api/channels/{username}",
    params(("username" = String, Path, description = "Channel username")),
    responses(
        (status = 200, description = "Channel profile", body = ChannelProfile),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Channel not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Channels"
)]
pub async fn get_channel_profile(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<ChannelProfile>>, AppError> {
    let profile =
        ChannelService::channel_profile(state.store.as_ref(), &username, viewer.id).await?;
    Ok(Json(ApiResponse::new(profile, "Success")))
}
