#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use vidstream::router::init_router;
use vidstream::state::AppState;
use vidstream::storage::UserStore;
use vidstream::storage::memory::MemoryStore;
use vidstream_auth::{create_access_token, create_refresh_token};
use vidstream_config::{CorsConfig, Environment, JwtConfig, MediaConfig, ServerConfig};
use vidstream_core::{LocalMediaStore, hash_password};

use vidstream::modules::users::model::{NewUser, UserProfile};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const BOUNDARY: &str = "x-vidstream-test-boundary";

/// Tiny valid-enough PNG payload for upload tests.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00];

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 86400,
        refresh_token_expiry: 864000,
    }
}

/// Same secret, lifetimes already elapsed; tokens minted with this config
/// verify as expired.
pub fn expired_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: -3600,
        refresh_token_expiry: -3600,
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub media_root: PathBuf,
}

impl TestApp {
    pub fn router(&self) -> Router {
        init_router(self.state.clone())
    }
}

pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let media_root = std::env::temp_dir().join(format!("vidstream-it-{}", Uuid::new_v4()));
    let media_config = MediaConfig {
        root: media_root.clone(),
        base_url: "http://localhost:8000/media".to_string(),
        max_upload_bytes: 5 * 1024 * 1024,
    };

    let state = AppState {
        store: store.clone(),
        media: Arc::new(LocalMediaStore::new(
            media_root.clone(),
            media_config.base_url.clone(),
        )),
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        server_config: ServerConfig {
            port: 0,
            environment: Environment::Development,
        },
        media_config,
    };

    TestApp {
        state,
        store,
        media_root,
    }
}

pub fn generate_unique_username() -> String {
    // Usernames are capped at 30 characters; a 12-hex-digit suffix is plenty
    // of uniqueness for a test run.
    let suffix = Uuid::new_v4().simple().to_string();
    format!("user-{}", &suffix[..12])
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Insert an account directly into the store.
pub async fn seed_user(
    app: &TestApp,
    username: &str,
    email: &str,
    password: &str,
) -> UserProfile {
    let digest = hash_password(password).unwrap();
    let user = app
        .store
        .create(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            full_name: "Test User".to_string(),
            password: digest,
            avatar: None,
            cover_image: None,
        })
        .await
        .unwrap();
    user.into_profile()
}

pub fn expired_access_token(profile: &UserProfile) -> String {
    create_access_token(
        profile.id,
        &profile.username,
        &profile.email,
        &expired_jwt_config(),
    )
    .unwrap()
}

pub fn expired_refresh_token(account_id: Uuid) -> String {
    create_refresh_token(account_id, &expired_jwt_config()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Value of the named `Set-Cookie` header on the response, if present.
/// Cleared cookies show up as `Some("")`.
pub fn set_cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| {
            let pair = raw.split(';').next().unwrap_or(raw);
            let (cookie_name, cookie_value) = pair.split_once('=')?;
            (cookie_name == name).then(|| cookie_value.to_string())
        })
}

pub async fn post_json(
    app: Router,
    uri: &str,
    cookies: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    let request = builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn login(app: Router, username: &str, password: &str) -> Response<Body> {
    post_json(
        app,
        "/api/auth/login",
        None,
        serde_json::json!({ "username": username, "password": password }),
    )
    .await
}

/// Log in and return `(access_token, refresh_token)` from the cookies.
pub async fn login_tokens(app: &TestApp, username: &str, password: &str) -> (String, String) {
    let response = login(app.router(), username, password).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let access = set_cookie_value(&response, "accessToken").expect("access cookie set");
    let refresh = set_cookie_value(&response, "refreshToken").expect("refresh cookie set");
    (access, refresh)
}

pub fn session_cookies(access: &str, refresh: &str) -> String {
    format!("accessToken={access}; refreshToken={refresh}")
}

/// Build a `multipart/form-data` body from text fields and file parts.
/// Files are `(field_name, file_name, content_type, bytes)`.
pub fn multipart_body(
    text_fields: &[(&str, &str)],
    files: &[(&str, &str, &str, &[u8])],
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in text_fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    for (name, file_name, content_type, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(
    app: Router,
    uri: &str,
    method: &str,
    cookies: Option<&str>,
    body: Vec<u8>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri).header(
        "content-type",
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Register through the API with the standard test avatar.
pub async fn register(
    app: &TestApp,
    username: &str,
    email: &str,
    password: &str,
) -> Response<Body> {
    let body = multipart_body(
        &[
            ("username", username),
            ("email", email),
            ("fullName", "Test User"),
            ("password", password),
        ],
        &[("avatar", "avatar.png", "image/png", PNG_BYTES)],
    );
    send_multipart(app.router(), "/api/auth/register", "POST", None, body).await
}

/// Recursively count regular files under the app's media root.
pub fn media_file_count(app: &TestApp) -> usize {
    fn walk(dir: &std::path::Path) -> usize {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return 0;
        };
        entries
            .filter_map(Result::ok)
            .map(|entry| {
                let path = entry.path();
                if path.is_dir() { walk(&path) } else { 1 }
            })
            .sum()
    }
    walk(&app.media_root)
}
