use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, RegisterRequest};
use crate::modules::channels::model::ChannelProfile;
use crate::modules::users::model::{
    ChangePasswordRequest, UpdateDetailsRequest, UserProfile, WatchHistoryEntry,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::users::controller::get_current_user,
        crate::modules::users::controller::update_details,
        crate::modules::users::controller::change_password,
        crate::modules::users::controller::update_avatar,
        crate::modules::users::controller::update_cover_image,
        crate::modules::users::controller::get_watch_history,
        crate::modules::channels::controller::get_channel_profile,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            UpdateDetailsRequest,
            ChangePasswordRequest,
            UserProfile,
            ChannelProfile,
            WatchHistoryEntry,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and session lifecycle"),
        (name = "Users", description = "Account management"),
        (name = "Channels", description = "Channel profiles")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
