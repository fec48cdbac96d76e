//! Registration, user lookups, and admin endpoints over HTTP.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;

use shelfhub_core::config::app::Platform;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_registration_validation_and_conflicts() {
    let app = TestApp::new();
    app.register("heidi").await;

    let duplicate = app
        .api(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "name": "Heidi 2", "email": "HEIDI@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let short_password = app
        .api(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "name": "Ivan", "email": "ivan@example.com", "password": "short" })),
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(short_password.json()["error"], "VALIDATION");
}

#[tokio::test]
async fn test_user_lookups_hide_password_hash() {
    let app = TestApp::new();
    let judy = app.user("judy").await;

    let by_id = app
        .api(
            Method::GET,
            &format!("/api/users/{}", judy.id),
            Some(&judy.access_token),
            None,
        )
        .await;
    assert_eq!(by_id.status, StatusCode::OK);
    assert!(by_id.json().get("hashed_password").is_none());

    let by_email = app
        .api(
            Method::GET,
            "/api/search/users?email=judy@example.com",
            Some(&judy.access_token),
            None,
        )
        .await;
    assert_eq!(by_email.json()["id"], judy.id);
}

#[tokio::test]
async fn test_update_credentials_changes_login() {
    let app = TestApp::new();
    let kim = app.user("kim").await;

    let updated = app
        .api(
            Method::PUT,
            "/api/users",
            Some(&kim.access_token),
            Some(json!({ "email": "kim@new.example.com" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["email"], "kim@new.example.com");

    assert_eq!(
        app.login("kim@example.com").await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(app.login("kim@new.example.com").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_per_user_views_are_private() {
    let app = TestApp::new();
    let leo = app.user("leo").await;
    let mia = app.user("mia").await;

    let response = app
        .api(
            Method::GET,
            &format!("/api/users/{}/locations", mia.id),
            Some(&leo.access_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_page_registration_renders_fragment() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/users")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "name": "Nia", "email": "nia@example.com", "password": PASSWORD })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.text.contains("Account created"));
}

#[tokio::test]
async fn test_healthz() {
    let app = TestApp::new();
    let response = app.api(Method::GET, "/admin/healthz", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "OK");
}

#[tokio::test]
async fn test_reset_only_on_dev() {
    let prod = TestApp::new();
    prod.register("olga").await;
    let refused = prod.api(Method::POST, "/admin/reset", None, None).await;
    assert_eq!(refused.status, StatusCode::FORBIDDEN);

    let dev = TestApp::with_platform(Platform::Dev);
    dev.register("pete").await;
    let reset = dev.api(Method::POST, "/admin/reset", None, None).await;
    assert_eq!(reset.status, StatusCode::OK);
    assert_eq!(reset.json()["deleted_users"], 1);
    assert_eq!(
        dev.login("pete@example.com").await.status,
        StatusCode::UNAUTHORIZED
    );
}
