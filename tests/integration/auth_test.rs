//! Integration tests for registration, login, and token refresh.

use http::StatusCode;

use crate::helpers::{TEST_PASSWORD, TestApp};

#[tokio::test]
async fn test_register_and_login_with_email() {
    let app = TestApp::new().await;

    let response = app.register("Alice", "alice", "alice@test.com").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["result"]["username"], "alice");
    // Credential fields never leak.
    assert!(response.body["result"].get("passwordHash").is_none());

    let response = app
        .request(
            "POST",
            "/v1/auth/login",
            Some(serde_json::json!({
                "email": "alice@test.com",
                "password": TEST_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["accessToken"].is_string());
    assert!(response.body["refreshToken"].is_string());
}

#[tokio::test]
async fn test_login_with_username() {
    let app = TestApp::new().await;
    app.register("Bob", "bob", "bob@test.com").await;

    let (access, refresh) = app.login("bob").await;
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());
}

#[tokio::test]
async fn test_login_with_both_identifiers_rejected() {
    let app = TestApp::new().await;
    app.register("Carol", "carol", "carol@test.com").await;

    let response = app
        .request(
            "POST",
            "/v1/auth/login",
            Some(serde_json::json!({
                "username": "carol",
                "email": "carol@test.com",
                "password": TEST_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["from"], "errorHandler");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.register("Dan", "dan", "dan@test.com").await;

    let response = app
        .request(
            "POST",
            "/v1/auth/login",
            Some(serde_json::json!({
                "username": "dan",
                "password": "WrongPassword1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["from"], "errorHandler");
}

#[tokio::test]
async fn test_login_unknown_user_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/v1/auth/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": TEST_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new().await;
    app.register("Eve", "eve", "eve@test.com").await;

    let response = app.register("Eve Again", "eve", "eve2@test.com").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_weak_password_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/v1/auth/register",
            Some(serde_json::json!({
                "name": "Frank",
                "username": "frank",
                "email": "frank@test.com",
                "password": "short",
                "profileType": "public",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_issues_usable_access_token() {
    let app = TestApp::new().await;
    app.register("Grace", "grace", "grace@test.com").await;
    let (access, refresh) = app.login("grace").await;

    let response = app
        .request(
            "POST",
            "/v1/auth/refresh",
            Some(serde_json::json!({ "refreshToken": refresh })),
            Some(&access),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_access = response.body["accessToken"].as_str().unwrap();

    // The refreshed token is cached and accepted on protected routes.
    let response = app
        .request("GET", "/v1/user/tags", None, Some(new_access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_with_foreign_token_rejected() {
    let app = TestApp::new().await;
    app.register("Heidi", "heidi", "heidi@test.com").await;
    let (access, _) = app.login("heidi").await;

    let response = app
        .request(
            "POST",
            "/v1/auth/refresh",
            Some(serde_json::json!({ "refreshToken": "not-a-jwt" })),
            Some(&access),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_token_is_forbidden() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/v1/user/tags", None, None).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["from"], "errorHandler");
    assert_eq!(response.body["message"], "Access denied, token missing.");
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/v1/user/tags", None, Some("garbage"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_is_open() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/v1/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["cache"], true);
}
