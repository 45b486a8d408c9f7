//! Notes API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_test_user, create_unique_test_user, TestApp};

#[tokio::test]
async fn test_notes_require_authentication() {
    let app = TestApp::new().await;

    app.server.get("/api/notes/").await.assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .post("/api/notes/")
        .json(&json!({ "title": "t", "content": "c" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .delete("/api/notes/delete/1/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_list_notes() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "alice", "alice@example.com").await;

    let response = app
        .server
        .post("/api/notes/")
        .authorization_bearer(&user.access)
        .json(&json!({ "title": "Groceries", "content": "Milk, eggs" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["title"], "Groceries");
    assert_eq!(created["content"], "Milk, eggs");
    assert_eq!(created["author"], user.id.to_string());
    assert!(created["id"].is_i64());
    assert!(created["created_at"].is_string());

    app.server
        .post("/api/notes/")
        .authorization_bearer(&user.access)
        .json(&json!({ "title": "Second", "content": "Newer" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.server.get("/api/notes/").authorization_bearer(&user.access).await;
    response.assert_status_ok();
    let notes: Vec<Value> = response.json();
    let titles: Vec<&str> = notes.iter().map(|n| n["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Second", "Groceries"]);
}

#[tokio::test]
async fn test_notes_are_private() {
    let app = TestApp::new().await;
    let alice = create_unique_test_user(&app).await;
    let bob = create_unique_test_user(&app).await;

    let response = app
        .server
        .post("/api/notes/")
        .authorization_bearer(&alice.access)
        .json(&json!({ "title": "Secret", "content": "Alice only" }))
        .await;
    let note: Value = response.json();
    let id = note["id"].as_i64().unwrap();

    let notes: Vec<Value> = app.server.get("/api/notes/").authorization_bearer(&bob.access).await.json();
    assert!(notes.is_empty());

    app.server
        .delete(&format!("/api/notes/delete/{id}/"))
        .authorization_bearer(&bob.access)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let notes: Vec<Value> = app.server.get("/api/notes/").authorization_bearer(&alice.access).await.json();
    assert_eq!(notes.len(), 1);
}

#[tokio::test]
async fn test_delete_note() {
    let app = TestApp::new().await;
    let user = create_unique_test_user(&app).await;

    let note: Value = app
        .server
        .post("/api/notes/")
        .authorization_bearer(&user.access)
        .json(&json!({ "title": "Temp", "content": "Delete me" }))
        .await
        .json();
    let path = format!("/api/notes/delete/{}/", note["id"]);

    app.server
        .delete(&path)
        .authorization_bearer(&user.access)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .delete(&path)
        .authorization_bearer(&user.access)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .delete("/api/notes/delete/not-a-number/")
        .authorization_bearer(&user.access)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_note_validation() {
    let app = TestApp::new().await;
    let user = create_unique_test_user(&app).await;

    let response = app
        .server
        .post("/api/notes/")
        .authorization_bearer(&user.access)
        .json(&json!({ "title": "x".repeat(101), "content": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "title": ["Ensure this field has no more than 100 characters."],
        "content": ["This field may not be blank."]
    }));

    let response = app
        .server
        .post("/api/notes/")
        .authorization_bearer(&user.access)
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "title": ["This field is required."],
        "content": ["This field is required."]
    }));
}

#[tokio::test]
async fn test_api_root_lists_notes_endpoint() {
    let app = TestApp::new().await;

    let response = app.server.get("/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["endpoints"]["notes"], "/api/notes/");
}
