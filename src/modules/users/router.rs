use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    change_password, get_current_user, get_watch_history, update_avatar, update_cover_image,
    update_details,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_user).patch(update_details))
        .route("/change-password", post(change_password))
        .route("/avatar", patch(update_avatar))
        .route("/cover-image", patch(update_cover_image))
        .route("/history", get(get_watch_history))
}
