//! Integration tests for user search, profile, password, and tags.

use http::StatusCode;

use crate::helpers::{TEST_PASSWORD, TestApp};

#[tokio::test]
async fn test_search_by_name_finds_public_profiles() {
    let app = TestApp::new().await;
    app.register("Alice Wonder", "alice", "alice@test.com").await;
    let token = app.register_and_login("bob").await;

    let response = app
        .request("GET", "/v1/user/search/alice?type=name", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let result = response.body["result"].as_array().unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0]["username"], "alice");
    assert!(result[0].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_search_by_username_is_exact() {
    let app = TestApp::new().await;
    app.register("Carol", "carol", "carol@test.com").await;
    let token = app.register_and_login("dave").await;

    let response = app
        .request(
            "GET",
            "/v1/user/search/carol?type=username",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["result"].as_array().unwrap().len(), 1);

    let response = app
        .request(
            "GET",
            "/v1/user/search/caro?type=username",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["result"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_rejects_unknown_type() {
    let app = TestApp::new().await;
    let token = app.register_and_login("erin").await;

    let response = app
        .request(
            "GET",
            "/v1/user/search/erin?type=email",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new().await;
    let token = app.register_and_login("frank").await;

    let response = app
        .request(
            "PUT",
            "/v1/user/update",
            Some(serde_json::json!({ "name": "Franklin", "profileType": "private" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["result"]["name"], "Franklin");
    assert_eq!(response.body["result"]["profileType"], "private");
    assert!(response.body["result"].get("passwordHash").is_none());

    // An empty patch is rejected.
    let response = app
        .request(
            "PUT",
            "/v1/user/update",
            Some(serde_json::json!({})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_password_and_relogin() {
    let app = TestApp::new().await;
    let token = app.register_and_login("grace").await;

    // Wrong old password.
    let response = app
        .request(
            "PUT",
            "/v1/user/updatePassword",
            Some(serde_json::json!({
                "oldPassword": "Wrong1password",
                "newPassword": "NewPassword1",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PUT",
            "/v1/user/updatePassword",
            Some(serde_json::json!({
                "oldPassword": TEST_PASSWORD,
                "newPassword": "NewPassword1",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The old password no longer logs in.
    let response = app
        .request(
            "POST",
            "/v1/auth/login",
            Some(serde_json::json!({ "username": "grace", "password": TEST_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/v1/auth/login",
            Some(serde_json::json!({ "username": "grace", "password": "NewPassword1" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_tag_add_remove_round_trip() {
    let app = TestApp::new().await;
    let token = app.register_and_login("heidi").await;

    let response = app
        .request(
            "PUT",
            "/v1/user/tag?queryType=add",
            Some(serde_json::json!({ "tag": "hidden gem" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Adding the same tag again succeeds without duplicating it.
    let response = app
        .request(
            "PUT",
            "/v1/user/tag?queryType=add",
            Some(serde_json::json!({ "tag": "hidden gem" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/v1/user/tags", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["tags"],
        serde_json::json!(["hidden gem"])
    );

    let response = app
        .request(
            "PUT",
            "/v1/user/tag?queryType=remove",
            Some(serde_json::json!({ "tag": "hidden gem" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/v1/user/tags", None, Some(&token)).await;
    assert!(response.body["tags"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_tag_rejects_unknown_query_type() {
    let app = TestApp::new().await;
    let token = app.register_and_login("ivan").await;

    let response = app
        .request(
            "PUT",
            "/v1/user/tag?queryType=rename",
            Some(serde_json::json!({ "tag": "x" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_account() {
    let app = TestApp::new().await;
    let token = app.register_and_login("judy").await;

    // Wrong password leaves the account in place.
    let response = app
        .request(
            "DELETE",
            "/v1/user",
            Some(serde_json::json!({ "password": "Wrong1password" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "DELETE",
            "/v1/user",
            Some(serde_json::json!({ "password": TEST_PASSWORD })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/v1/auth/login",
            Some(serde_json::json!({ "username": "judy", "password": TEST_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
