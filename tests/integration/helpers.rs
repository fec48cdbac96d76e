//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use shelfhub_api::{AppState, Stores, build_app};
use shelfhub_core::config::AppConfig;
use shelfhub_core::config::app::Platform;
use shelfhub_database::{DatabasePool, MemoryStore};

pub const PASSWORD: &str = "correct horse battery";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The store behind users, locations, and sessions
    pub store: MemoryStore,
}

/// A decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }

    /// All `Set-Cookie` header values.
    pub fn cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect()
    }

    /// The value set for cookie `name`.
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        self.cookies().into_iter().find_map(|c| {
            c.split(';')
                .next()
                .and_then(|pair| pair.strip_prefix(&format!("{name}=")))
                .map(String::from)
        })
    }
}

/// A registered user with a live session.
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Create a new test application on the `prod` platform
    pub fn new() -> Self {
        Self::with_platform(Platform::Prod)
    }

    pub fn with_platform(platform: Platform) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.server.platform = platform;
        config.database.min_connections = 0;

        let store = MemoryStore::new();
        let db_pool = DatabasePool::connect_lazy(&config.database).expect("lazy pool");
        let state = AppState::new(config, db_pool, Stores::memory(&store)).expect("app state");

        Self {
            router: build_app(state),
            store,
        }
    }

    /// Sends a request and buffers the response.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        TestResponse {
            status,
            headers,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Sends a JSON API request, optionally with a bearer token.
    pub async fn api(
        &self,
        method: Method,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        self.send(request).await
    }

    pub async fn register(&self, name: &str) -> String {
        let email = format!("{name}@example.com");
        let response = self
            .api(
                Method::POST,
                "/api/users",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": PASSWORD,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.json()["id"].as_str().expect("user id").to_string()
    }

    pub async fn login(&self, email: &str) -> TestResponse {
        self.api(
            Method::POST,
            "/api/login",
            None,
            Some(serde_json::json!({ "email": email, "password": PASSWORD })),
        )
        .await
    }

    /// Registers `name` and logs them in through the JSON API.
    pub async fn user(&self, name: &str) -> TestUser {
        let id = self.register(name).await;
        let email = format!("{name}@example.com");
        let body = self.login(&email).await.json();
        TestUser {
            id,
            email,
            access_token: body["access_token"].as_str().expect("access").to_string(),
            refresh_token: body["refresh_token"].as_str().expect("refresh").to_string(),
        }
    }

    /// Creates a location owned by `owner` and returns its ID.
    pub async fn location(&self, owner: &TestUser, name: &str) -> String {
        let response = self
            .api(
                Method::POST,
                "/api/locations",
                Some(&owner.access_token),
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.json()["id"].as_str().expect("location id").to_string()
    }
}
