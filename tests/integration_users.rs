mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use common::*;
use vidstream::modules::users::model::WatchHistoryEntry;

const PASSWORD: &str = "Passw0rd!";

async fn get(app: &TestApp, uri: &str, cookies: &str) -> axum::http::Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookies)
        .body(Body::empty())
        .unwrap();
    app.router().oneshot(request).await.unwrap()
}

#[tokio::test]
async fn test_get_current_user() {
    let app = setup_test_app();
    let username = generate_unique_username();
    let profile = seed_user(&app, &username, &generate_unique_email(), PASSWORD).await;
    let (access, refresh) = login_tokens(&app, &username, PASSWORD).await;

    let response = get(&app, "/api/users/me", &session_cookies(&access, &refresh)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], profile.id.to_string());
    assert_eq!(body["data"]["username"], username.as_str());
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_update_details() {
    let app = setup_test_app();
    let username = generate_unique_username();
    seed_user(&app, &username, &generate_unique_email(), PASSWORD).await;
    let (access, refresh) = login_tokens(&app, &username, PASSWORD).await;
    let cookies = session_cookies(&access, &refresh);

    let request = Request::builder()
        .method("PATCH")
        .uri("/api/users/me")
        .header("content-type", "application/json")
        .header(header::COOKIE, cookies.as_str())
        .body(Body::from(r#"{"fullName":"Renamed User"}"#))
        .unwrap();
    let response = app.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["fullName"], "Renamed User");

    // An empty patch is rejected.
    let request = Request::builder()
        .method("PATCH")
        .uri("/api/users/me")
        .header("content-type", "application/json")
        .header(header::COOKIE, cookies.as_str())
        .body(Body::from("{}"))
        .unwrap();
    let response = app.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Either email or name is required");
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = setup_test_app();
    let username = generate_unique_username();
    seed_user(&app, &username, &generate_unique_email(), PASSWORD).await;
    let (access, refresh) = login_tokens(&app, &username, PASSWORD).await;
    let cookies = session_cookies(&access, &refresh);

    let new_password = "NewPassw0rd!";
    let response = post_json(
        app.router(),
        "/api/users/change-password",
        Some(&cookies),
        serde_json::json!({ "oldPassword": PASSWORD, "newPassword": new_password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Password Changed Successfully");

    // The old password no longer logs in.
    let response = login(app.router(), &username, PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Incorrect Password");

    // The new one does.
    let response = login(app.router(), &username, new_password).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The pre-change session was not invalidated.
    let response = get(&app, "/api/users/me", &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_wrong_old_password() {
    let app = setup_test_app();
    let username = generate_unique_username();
    seed_user(&app, &username, &generate_unique_email(), PASSWORD).await;
    let (access, refresh) = login_tokens(&app, &username, PASSWORD).await;

    let response = post_json(
        app.router(),
        "/api/users/change-password",
        Some(&session_cookies(&access, &refresh)),
        serde_json::json!({ "oldPassword": "WrongPass1!", "newPassword": "NewPassw0rd!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Incorrect Old Password");

    // The original password still works.
    let response = login(app.router(), &username, PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_avatar() {
    let app = setup_test_app();
    let username = generate_unique_username();
    seed_user(&app, &username, &generate_unique_email(), PASSWORD).await;
    let (access, refresh) = login_tokens(&app, &username, PASSWORD).await;

    let body = multipart_body(&[], &[("avatar", "new.png", "image/png", PNG_BYTES)]);
    let response = send_multipart(
        app.router(),
        "/api/users/avatar",
        "PATCH",
        Some(&session_cookies(&access, &refresh)),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let avatar = body["data"]["avatar"].as_str().unwrap();
    assert!(avatar.contains(&format!("{username}-avatar")));
    assert_eq!(media_file_count(&app), 1);
}

#[tokio::test]
async fn test_update_avatar_missing_file() {
    let app = setup_test_app();
    let username = generate_unique_username();
    seed_user(&app, &username, &generate_unique_email(), PASSWORD).await;
    let (access, refresh) = login_tokens(&app, &username, PASSWORD).await;

    let body = multipart_body(&[("note", "no file here")], &[]);
    let response = send_multipart(
        app.router(),
        "/api/users/avatar",
        "PATCH",
        Some(&session_cookies(&access, &refresh)),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Avatar file is missing");
}

#[tokio::test]
async fn test_update_cover_image() {
    let app = setup_test_app();
    let username = generate_unique_username();
    seed_user(&app, &username, &generate_unique_email(), PASSWORD).await;
    let (access, refresh) = login_tokens(&app, &username, PASSWORD).await;

    let body = multipart_body(&[], &[("coverImage", "cover.png", "image/png", PNG_BYTES)]);
    let response = send_multipart(
        app.router(),
        "/api/users/cover-image",
        "PATCH",
        Some(&session_cookies(&access, &refresh)),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let cover = body["data"]["coverImage"].as_str().unwrap();
    assert!(cover.contains(&format!("{username}-cover")));
    // The avatar is untouched by a cover-image update.
    assert!(body["data"]["avatar"].is_null());
}

#[tokio::test]
async fn test_unsupported_image_type_rejected() {
    let app = setup_test_app();
    let username = generate_unique_username();
    seed_user(&app, &username, &generate_unique_email(), PASSWORD).await;
    let (access, refresh) = login_tokens(&app, &username, PASSWORD).await;

    let body = multipart_body(
        &[],
        &[("avatar", "script.sh", "application/x-sh", b"#!/bin/sh")],
    );
    let response = send_multipart(
        app.router(),
        "/api/users/avatar",
        "PATCH",
        Some(&session_cookies(&access, &refresh)),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Unsupported image type");
}

#[tokio::test]
async fn test_channel_profile_counts() {
    let app = setup_test_app();
    let channel_name = generate_unique_username();
    let channel = seed_user(&app, &channel_name, &generate_unique_email(), PASSWORD).await;
    let fan_name = generate_unique_username();
    let fan = seed_user(&app, &fan_name, &generate_unique_email(), PASSWORD).await;
    let other = seed_user(
        &app,
        &generate_unique_username(),
        &generate_unique_email(),
        PASSWORD,
    )
    .await;

    app.store.add_subscription(fan.id, channel.id);
    app.store.add_subscription(other.id, channel.id);
    app.store.add_subscription(channel.id, fan.id);

    let (access, refresh) = login_tokens(&app, &fan_name, PASSWORD).await;
    let cookies = session_cookies(&access, &refresh);

    let response = get(&app, &format!("/api/channels/{channel_name}"), &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], channel_name.as_str());
    assert_eq!(body["data"]["subscriberCount"], 2);
    assert_eq!(body["data"]["subscribedToCount"], 1);
    assert_eq!(body["data"]["isSubscribed"], true);

    // Unknown channels are a 404.
    let response = get(&app, "/api/channels/no-such-channel", &cookies).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Channel Not Found");
}

#[tokio::test]
async fn test_watch_history_most_recent_first() {
    let app = setup_test_app();
    let username = generate_unique_username();
    let profile = seed_user(&app, &username, &generate_unique_email(), PASSWORD).await;

    app.store.record_watch(
        profile.id,
        WatchHistoryEntry {
            video_id: Uuid::new_v4(),
            title: "first watched".to_string(),
            thumbnail: None,
            watched_at: Utc::now() - chrono::Duration::hours(3),
        },
    );
    app.store.record_watch(
        profile.id,
        WatchHistoryEntry {
            video_id: Uuid::new_v4(),
            title: "last watched".to_string(),
            thumbnail: Some("http://localhost:8000/media/thumbs/x.png".to_string()),
            watched_at: Utc::now(),
        },
    );

    let (access, refresh) = login_tokens(&app, &username, PASSWORD).await;
    let response = get(
        &app,
        "/api/users/history",
        &session_cookies(&access, &refresh),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "last watched");
    assert_eq!(entries[1]["title"], "first watched");
}
