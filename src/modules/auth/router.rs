use axum::{Router, middleware, routing::post};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

use super::controller::{login_user, logout_user, register_user};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route(
            "/logout",
            post(logout_user).route_layer(middleware::from_fn_with_state(state, require_auth)),
        )
}
