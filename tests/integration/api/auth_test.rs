//! Authentication API integration tests
//!
//! Tests for registration, token issuance, refresh and the current user.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_test_user, TestApp, TEST_PASSWORD};
use notes_backend::backend::auth::users::set_user_active;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/user/register/")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "s3cret-pass",
            "confirm_password": "s3cret-pass"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body["id"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username_and_email() {
    let app = TestApp::new().await;
    create_test_user(&app, "alice", "alice@example.com").await;

    let response = app
        .server
        .post("/api/user/register/")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "another-pass"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "username": ["A user with that username already exists."],
            "email": ["A user with that email already exists."]
        })
    );
}

#[tokio::test]
async fn test_register_collects_field_errors() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/user/register/")
        .json(&json!({
            "username": "",
            "email": "not-an-email",
            "password": "one",
            "confirm_password": "two"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["username"], json!(["This field may not be blank."]));
    assert_eq!(body["email"], json!(["Enter a valid email address."]));
    assert_eq!(body["confirm_password"], json!(["Passwords do not match"]));

    let response = app.server.post("/api/user/register/").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    for field in ["username", "email", "password"] {
        assert_eq!(body[field], json!(["This field is required."]), "field {field}");
    }
}

#[tokio::test]
async fn test_registration_succeeds_once() {
    let app = TestApp::new().await;
    let request = json!({
        "username": "bob",
        "email": "bob@example.com",
        "password": "pass-word-1"
    });

    app.server
        .post("/api/user/register/")
        .json(&request)
        .await
        .assert_status(StatusCode::CREATED);
    app.server
        .post("/api/user/register/")
        .json(&request)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(app.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_login_with_username_or_email() {
    let app = TestApp::new().await;
    create_test_user(&app, "alice", "alice@example.com").await;

    for identifier in ["alice", "alice@example.com"] {
        let response = app
            .server
            .post("/api/token/")
            .json(&json!({ "login": identifier, "password": TEST_PASSWORD }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["access"].is_string());
        assert!(body["refresh"].is_string());
        assert!(body.get("access_expires").is_none());
    }
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "alice", "alice@example.com").await;

    for identifier in ["alice", "alice@example.com"] {
        let response = app
            .server
            .post("/api/token/")
            .json(&json!({ "login": identifier, "password": "wrong-password" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Invalid password." }));
    }

    let response = app
        .server
        .post("/api/token/")
        .json(&json!({ "login": "nobody", "password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Account not found. Please check your username or email." }));

    set_user_active(app.pool(), user.id, false).await.unwrap();
    let response = app
        .server
        .post("/api/token/")
        .json(&json!({ "login": "alice", "password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "This account is inactive." }));
}

#[tokio::test]
async fn test_remember_me_stores_single_token() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "alice", "alice@example.com").await;

    let mut last_refresh = String::new();
    for _ in 0..2 {
        let response = app
            .server
            .post("/api/token/")
            .json(&json!({ "login": "alice", "password": TEST_PASSWORD, "remember_me": true }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["access_expires"].is_string());
        assert!(body["refresh_expires"].is_string());
        last_refresh = body["refresh"].as_str().unwrap().to_string();
    }

    let tokens: Vec<String> = sqlx::query_scalar("SELECT token FROM remember_me_tokens WHERE user_id = ?")
        .bind(user.id)
        .fetch_all(app.pool())
        .await
        .unwrap();
    assert_eq!(tokens, vec![last_refresh]);
}

#[tokio::test]
async fn test_refresh_token_flow() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "alice", "alice@example.com").await;

    let response = app
        .server
        .post("/api/token/refresh/")
        .json(&json!({ "refresh": user.refresh }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let access = body["access"].as_str().unwrap();

    app.server
        .get("/api/user/current/")
        .authorization_bearer(access)
        .await
        .assert_status_ok();

    // An access token is not a refresh token
    let response = app
        .server
        .post("/api/token/refresh/")
        .json(&json!({ "refresh": user.access }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], "token_not_valid");

    let response = app.server.post("/api/token/refresh/").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "refresh": ["This field is required."] }));
}

#[tokio::test]
async fn test_current_user() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "alice", "alice@example.com").await;

    let response = app
        .server
        .get("/api/user/current/")
        .authorization_bearer(&user.access)
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "id": user.id.to_string(),
        "username": "alice",
        "email": "alice@example.com"
    }));

    let response = app.server.get("/api/user/current/").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "detail": "Authentication credentials were not provided." }));

    let response = app
        .server
        .get("/api/user/current/")
        .authorization_bearer("not-a-jwt")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_inactive_user_tokens_are_rejected() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "alice", "alice@example.com").await;

    set_user_active(app.pool(), user.id, false).await.unwrap();

    app.server
        .get("/api/user/current/")
        .authorization_bearer(&user.access)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .post("/api/token/refresh/")
        .json(&json!({ "refresh": user.refresh }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
