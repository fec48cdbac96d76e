//! Login, refresh, and revocation over HTTP.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_refresh_token_survives_refresh_until_revoked() {
    let app = TestApp::new();
    let user = app.user("alice").await;

    let first = app
        .api(Method::POST, "/api/refresh", Some(&user.refresh_token), None)
        .await;
    assert_eq!(first.status, StatusCode::OK, "{}", first.text);
    let t2 = first.json()["access_token"].as_str().unwrap().to_string();
    assert_ne!(t2, user.access_token);

    let second = app
        .api(Method::POST, "/api/refresh", Some(&user.refresh_token), None)
        .await;
    assert_eq!(second.status, StatusCode::OK);

    let revoked = app
        .api(Method::POST, "/api/revoke", Some(&user.refresh_token), None)
        .await;
    assert_eq!(revoked.status, StatusCode::NO_CONTENT);

    let after = app
        .api(Method::POST, "/api/refresh", Some(&user.refresh_token), None)
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
    assert_eq!(after.json()["error"], "UNAUTHORIZED");

    // Access tokens are not tracked, so the refreshed one still works.
    let users = app.api(Method::GET, "/api/users", Some(&t2), None).await;
    assert_eq!(users.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("bob").await;

    let wrong_password = app
        .api(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "bob@example.com", "password": "not the password" })),
        )
        .await;
    let unknown_email = app
        .api(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json(), unknown_email.json());
}

#[tokio::test]
async fn test_login_response_never_exposes_password_hash() {
    let app = TestApp::new();
    app.register("carol").await;

    let body = app.login("carol@example.com").await.json();
    assert_eq!(body["user"]["email"], "carol@example.com");
    assert!(body["user"].get("hashed_password").is_none());
    assert!(body["access_token_expires_at"].is_string());
    assert!(body["refresh_token_expires_at"].is_string());
}

#[tokio::test]
async fn test_page_login_sets_session_cookies() {
    let app = TestApp::new();
    app.register("dave").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/login")
        .header(header::ACCEPT, "text/html")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "dave@example.com", "password": PASSWORD }).to_string(),
        ))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("Login successful"));
    let cookies = response.cookies();
    assert_eq!(cookies.len(), 2);
    for cookie in &cookies {
        assert!(cookie.contains("HttpOnly"), "{cookie}");
        assert!(cookie.contains("Secure"), "{cookie}");
        assert!(cookie.contains("SameSite=Lax"), "{cookie}");
        assert!(cookie.contains("Path=/"), "{cookie}");
    }

    let access = response.cookie_value("accessToken").expect("access cookie");
    let refresh = response.cookie_value("refreshToken").expect("refresh cookie");

    let me = app
        .send(
            Request::builder()
                .uri("/api/users")
                .header(header::ACCEPT, "application/json")
                .header(header::COOKIE, format!("accessToken={access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(me.status, StatusCode::OK);

    let refreshed = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/refresh")
                .header(header::ACCEPT, "text/html")
                .header(header::COOKIE, format!("refreshToken={refresh}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert!(refreshed.cookie_value("accessToken").is_some());
}

#[tokio::test]
async fn test_page_login_failure_renders_fragment() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "ghost@example.com", "password": PASSWORD }).to_string(),
        ))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.text.starts_with("<div"));
    assert!(response.cookies().is_empty());
}

#[tokio::test]
async fn test_revoke_all_is_idempotent() {
    let app = TestApp::new();
    let user = app.user("erin").await;
    let second_session = app.login(&user.email).await.json();
    let second_refresh = second_session["refresh_token"].as_str().unwrap();

    let first = app
        .api(Method::POST, "/api/revoke-all", Some(&user.access_token), None)
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json()["revoked"], 2);

    let again = app
        .api(Method::POST, "/api/revoke-all", Some(&user.access_token), None)
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.json()["revoked"], 0);

    for token in [user.refresh_token.as_str(), second_refresh] {
        let response = app
            .api(Method::POST, "/api/refresh", Some(token), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_revoke_twice_then_unknown() {
    let app = TestApp::new();
    let user = app.user("frank").await;

    for _ in 0..2 {
        let response = app
            .api(Method::POST, "/api/revoke", Some(&user.refresh_token), None)
            .await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
    }

    let unknown = app
        .api(Method::POST, "/api/revoke", Some("not-a-real-token"), None)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_protected_routes_require_a_valid_access_token() {
    let app = TestApp::new();

    let missing = app.api(Method::GET, "/api/locations", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json()["error"], "MISSING_CREDENTIAL");

    let garbage = app
        .api(Method::GET, "/api/locations", Some("not.a.jwt"), None)
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.json()["error"], "INVALID_TOKEN");

    let refresh_missing = app.api(Method::POST, "/api/refresh", None, None).await;
    assert_eq!(refresh_missing.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = TestApp::new();
    let user = app.user("grace").await;

    let response = app
        .api(Method::GET, "/api/users", Some(&user.refresh_token), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
