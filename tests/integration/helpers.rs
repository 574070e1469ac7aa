//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use medialist_api::router::build_router;
use medialist_api::state::AppState;
use medialist_cache::CacheManager;
use medialist_core::config::{AppConfig, DatabaseConfig};
use medialist_database::memory::{MemoryListStore, MemoryUserStore};
use medialist_database::{ListStore, UserStore};

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
}

impl TestApp {
    /// Create a new test application backed by in-memory stores.
    pub async fn new() -> Self {
        let config = test_config();

        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );

        let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let lists: Arc<dyn ListStore> = Arc::new(MemoryListStore::new());

        let state = AppState::build(Arc::new(config), cache, users, lists);
        let router = build_router(state);

        Self { router }
    }

    /// Register a user with the standard test password.
    pub async fn register(&self, name: &str, username: &str, email: &str) -> TestResponse {
        self.request(
            "POST",
            "/v1/auth/register",
            Some(serde_json::json!({
                "name": name,
                "username": username,
                "email": email,
                "password": TEST_PASSWORD,
                "profileType": "public",
            })),
            None,
        )
        .await
    }

    /// Login with a username and return the (access, refresh) token pair.
    pub async fn login(&self, username: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/v1/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": TEST_PASSWORD,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        let access = response.body["accessToken"]
            .as_str()
            .expect("No accessToken in login response")
            .to_string();
        let refresh = response.body["refreshToken"]
            .as_str()
            .expect("No refreshToken in login response")
            .to_string();
        (access, refresh)
    }

    /// Register a user and return an access token for them.
    pub async fn register_and_login(&self, username: &str) -> String {
        let response = self
            .register(username, username, &format!("{username}@test.com"))
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Register failed: {:?}",
            response.body
        );
        self.login(username).await.0
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Password satisfying the default policy.
pub const TEST_PASSWORD: &str = "Password1";

/// A sample media item for list tests. Status-based lists reject
/// `userRating`, so the sample carries `anticipation` instead.
pub fn sample_item(media_id: &str) -> Value {
    serde_json::json!({
        "mediaId": media_id,
        "title": "The Matrix",
        "information": {
            "createdAt": "2024-01-01T00:00:00Z",
            "rating": 8.7,
            "posterImage": "/posters/tt0133093.jpg",
            "genres": ["sci-fi"],
        },
        "tags": [],
        "anticipation": 5,
    })
}

fn test_config() -> AppConfig {
    AppConfig {
        server: Default::default(),
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        cache: Default::default(),
        auth: Default::default(),
        logging: Default::default(),
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}
