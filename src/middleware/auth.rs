//! Auth session manager.
//!
//! [`require_auth`] evaluates the session state machine once per request:
//! verify the access token, or silently renew it from the refresh token when
//! it has only expired. Expired and otherwise-invalid tokens take different
//! paths: expiry is a routine renewal opportunity, while a malformed token or
//! bad signature fails without touching the refresh side.
//!
//! Cookie handling rides on [`CookieJar`], so renewal and session-teardown
//! cookie mutations are carried on whatever response the request produces.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;
use uuid::Uuid;

use vidstream_auth::{TokenError, create_access_token, verify_access_token, verify_refresh_token};
use vidstream_core::AppError;

use crate::modules::users::model::{User, UserProfile};
use crate::state::AppState;
use crate::storage::UserStore;
use crate::utils::cookies::{
    ACCESS_COOKIE, REFRESH_COOKIE, bearer_token, clear_session_cookie, session_cookie,
};

/// The authenticated account's public projection, attached to the request by
/// [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserProfile);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("No Access Token"))
    }
}

/// Authentication middleware. Apply with `middleware::from_fn_with_state`.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let access_token = jar
        .get(ACCESS_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(req.headers()));

    let Some(access_token) = access_token else {
        return (jar, AppError::unauthorized("No Access Token")).into_response();
    };

    match verify_access_token(&access_token, &state.jwt_config) {
        Ok(claims) => {
            let account = match lookup_account(state.store.as_ref(), &claims.sub).await {
                Ok(account) => account,
                Err(err) => return (jar, err).into_response(),
            };
            let Some(user) = account else {
                return (jar, AppError::unauthorized("User Not Found")).into_response();
            };

            req.extensions_mut().insert(CurrentUser(user.into_profile()));
            (jar, next.run(req).await).into_response()
        }
        Err(TokenError::Expired) => renew_session(state, jar, req, next).await,
        Err(TokenError::Invalid) => {
            (jar, AppError::unauthorized("Invalid Token")).into_response()
        }
    }
}

/// Silent-renewal path: the access token has expired, so the session lives or
/// dies by the refresh token.
async fn renew_session(
    state: AppState,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let secure = state.server_config.environment.is_production();

    let Some(refresh_token) = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
    else {
        return (jar, AppError::unauthorized("No Refresh Token")).into_response();
    };

    let claims = match verify_refresh_token(&refresh_token, &state.jwt_config) {
        Ok(claims) => claims,
        Err(TokenError::Expired) => {
            // Both tokens are dead; tear the session down and force a full
            // re-login.
            let jar = jar
                .remove(clear_session_cookie(ACCESS_COOKIE, secure))
                .remove(clear_session_cookie(REFRESH_COOKIE, secure));
            return (jar, AppError::forbidden("Session expired; log in again")).into_response();
        }
        Err(TokenError::Invalid) => {
            return (jar, AppError::unauthorized("Invalid Refresh Token")).into_response();
        }
    };

    let account = match lookup_account(state.store.as_ref(), &claims.sub).await {
        Ok(account) => account,
        Err(err) => return (jar, err).into_response(),
    };

    // A missing account, or a stored value differing from the presented
    // token, means this refresh token was superseded or revoked.
    let matching =
        account.filter(|user| user.refresh_token.as_deref() == Some(refresh_token.as_str()));
    let Some(user) = matching else {
        let jar = jar.remove(clear_session_cookie(REFRESH_COOKIE, secure));
        return (jar, AppError::unauthorized("Invalid Refresh Token")).into_response();
    };

    let access_token =
        match create_access_token(user.id, &user.username, &user.email, &state.jwt_config) {
            Ok(token) => token,
            Err(err) => return (jar, err).into_response(),
        };

    debug!(account_id = %user.id, "access token silently renewed");

    // Only the access token is re-minted; the refresh token stays as issued
    // at login.
    let jar = jar.add(session_cookie(ACCESS_COOKIE, access_token, secure));
    req.extensions_mut().insert(CurrentUser(user.into_profile()));
    (jar, next.run(req).await).into_response()
}

async fn lookup_account(store: &dyn UserStore, sub: &str) -> Result<Option<User>, AppError> {
    let Ok(id) = Uuid::parse_str(sub) else {
        return Ok(None);
    };
    store.find_by_id(id).await
}
