use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_channel_profile;

pub fn init_channels_router() -> Router<AppState> {
    Router::new().route("/{username}", get(get_channel_profile))
}
