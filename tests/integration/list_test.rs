//! Integration tests for list lifecycle, detail updates, and items.

use http::StatusCode;

use crate::helpers::{TestApp, sample_item};

#[tokio::test]
async fn test_list_lifecycle() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice").await;

    // Create.
    let response = app
        .request(
            "POST",
            "/v1/list",
            Some(serde_json::json!({
                "privacy": "public",
                "type": "statusBased",
                "name": "Watchlist",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["result"]["name"], "Watchlist");
    assert_eq!(response.body["result"]["type"], "statusBased");
    let list_id = response.body["result"]["id"].as_str().unwrap().to_string();

    // Fetch.
    let response = app
        .request(
            "GET",
            &format!("/v1/list/{list_id}?type=statusBased"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["result"]["id"], list_id.as_str());

    // Delete.
    let response = app
        .request(
            "DELETE",
            &format!("/v1/list/{list_id}?type=statusBased"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The reference is gone with the row, so the fetch is denied.
    let response = app
        .request(
            "GET",
            &format!("/v1/list/{list_id}?type=statusBased"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["from"], "errorHandler");
}

#[tokio::test]
async fn test_get_with_wrong_kind_is_denied() {
    let app = TestApp::new().await;
    let token = app.register_and_login("bob").await;

    let response = app
        .request(
            "POST",
            "/v1/list",
            Some(serde_json::json!({
                "privacy": "private",
                "type": "themeBased",
                "name": "Best soundtracks",
            })),
            Some(&token),
        )
        .await;
    let list_id = response.body["result"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "GET",
            &format!("/v1/list/{list_id}?type=statusBased"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "You do not own this list");
}

#[tokio::test]
async fn test_list_is_invisible_to_other_users() {
    let app = TestApp::new().await;
    let owner = app.register_and_login("carol").await;
    let intruder = app.register_and_login("dave").await;

    let response = app
        .request(
            "POST",
            "/v1/list",
            Some(serde_json::json!({
                "privacy": "public",
                "type": "statusBased",
                "name": "Watchlist",
            })),
            Some(&owner),
        )
        .await;
    let list_id = response.body["result"]["id"].as_str().unwrap().to_string();

    for method in ["GET", "DELETE"] {
        let response = app
            .request(
                method,
                &format!("/v1/list/{list_id}?type=statusBased"),
                None,
                Some(&intruder),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    // Unchanged for the owner.
    let response = app
        .request(
            "GET",
            &format!("/v1/list/{list_id}?type=statusBased"),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_rejects_short_name() {
    let app = TestApp::new().await;
    let token = app.register_and_login("erin").await;

    let response = app
        .request(
            "POST",
            "/v1/list",
            Some(serde_json::json!({
                "privacy": "public",
                "type": "statusBased",
                "name": "ab",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_details_by_update_type() {
    let app = TestApp::new().await;
    let token = app.register_and_login("frank").await;

    let response = app
        .request(
            "POST",
            "/v1/list",
            Some(serde_json::json!({
                "privacy": "public",
                "type": "themeBased",
                "name": "Soundtracks",
            })),
            Some(&token),
        )
        .await;
    let list_id = response.body["result"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/v1/list/update/{list_id}?updateType=name"),
            Some(serde_json::json!({ "name": "Best soundtracks" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["result"]["name"], "Best soundtracks");

    let response = app
        .request(
            "PUT",
            &format!("/v1/list/update/{list_id}?updateType=privacy"),
            Some(serde_json::json!({ "privacy": "private" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["result"]["privacy"], "private");

    // The body must carry the field the query names.
    let response = app
        .request(
            "PUT",
            &format!("/v1/list/update/{list_id}?updateType=name"),
            Some(serde_json::json!({ "privacy": "public" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PUT",
            &format!("/v1/list/update/{list_id}?updateType=color"),
            Some(serde_json::json!({ "name": "x" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_item_add_update_remove() {
    let app = TestApp::new().await;
    let token = app.register_and_login("grace").await;

    let response = app
        .request(
            "POST",
            "/v1/list",
            Some(serde_json::json!({
                "privacy": "public",
                "type": "statusBased",
                "name": "Watchlist",
            })),
            Some(&token),
        )
        .await;
    let list_id = response.body["result"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/v1/list/{list_id}/items"),
            Some(serde_json::json!({ "items": [sample_item("m1"), sample_item("m2")] })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["result"]["items"].as_array().unwrap().len(), 2);

    let response = app
        .request(
            "PUT",
            &format!("/v1/list/{list_id}/items/m1"),
            Some(serde_json::json!({ "customNotes": "start this weekend" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["result"]["items"][0]["customNotes"],
        "start this weekend"
    );

    // A user rating is a theme-based field; a status-based list rejects it.
    let response = app
        .request(
            "PUT",
            &format!("/v1/list/{list_id}/items/m1"),
            Some(serde_json::json!({ "userRating": 8.5 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "DELETE",
            &format!("/v1/list/{list_id}/items"),
            Some(serde_json::json!({ "mediaIds": ["m1"] })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["result"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["mediaId"], "m2");
}

#[tokio::test]
async fn test_update_missing_item_is_not_found() {
    let app = TestApp::new().await;
    let token = app.register_and_login("heidi").await;

    let response = app
        .request(
            "POST",
            "/v1/list",
            Some(serde_json::json!({
                "privacy": "public",
                "type": "themeBased",
                "name": "Soundtracks",
            })),
            Some(&token),
        )
        .await;
    let list_id = response.body["result"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/v1/list/{list_id}/items/missing"),
            Some(serde_json::json!({ "customNotes": "x" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
