//! Password reset API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_test_user, login, TestApp};

const GENERIC_MESSAGE: &str = "If an account exists with this email, you will receive a reset code.";

fn code_from(text: &str) -> String {
    text.rsplit(' ').next().unwrap().trim().to_string()
}

#[tokio::test]
async fn test_request_reset_unknown_email_is_generic() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/password/request-reset/")
        .json(&json!({ "email": "nobody@example.com" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": GENERIC_MESSAGE }));
    assert!(app.sent_emails().is_empty());
}

#[tokio::test]
async fn test_request_reset_requires_email() {
    let app = TestApp::new().await;

    let response = app.server.post("/api/password/request-reset/").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "Email is required",
        "detail": "Please provide an email address to reset your password."
    }));
}

#[tokio::test]
async fn test_full_reset_flow() {
    let app = TestApp::new().await;
    create_test_user(&app, "alice", "alice@example.com").await;

    let response = app
        .server
        .post("/api/password/request-reset/")
        .json(&json!({ "email": "alice@example.com" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": GENERIC_MESSAGE }));

    let sent = app.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");
    assert_eq!(sent[0].subject, "Your Password Reset Code");
    let code = code_from(&sent[0].text);
    assert_eq!(code.len(), 6);

    let response = app
        .server
        .post("/api/password/verify-reset/")
        .json(&json!({ "email": "alice@example.com", "code": code, "new_password": "brand-new-pass" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "message": "Password reset successful. You can now log in with your new password."
    }));

    let (access, _) = login(&app, "alice", "brand-new-pass").await;
    assert!(!access.is_empty());

    // The code is single use
    let response = app
        .server
        .post("/api/password/verify-reset/")
        .json(&json!({ "email": "alice@example.com", "code": code, "new_password": "third-pass" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid reset code");
}

#[tokio::test]
async fn test_verify_reset_rejects_bad_input() {
    let app = TestApp::new().await;
    create_test_user(&app, "alice", "alice@example.com").await;

    let response = app
        .server
        .post("/api/password/verify-reset/")
        .json(&json!({ "email": "alice@example.com", "code": "123456" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "Missing required fields",
        "detail": "Email, code, and new password are required."
    }));

    let response = app
        .server
        .post("/api/password/verify-reset/")
        .json(&json!({ "email": "alice@example.com", "code": "000000", "new_password": "whatever" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "Invalid reset code",
        "detail": "The reset code is invalid or has expired. Please request a new one."
    }));
}

#[tokio::test]
async fn test_third_request_hits_cooldown() {
    let app = TestApp::new().await;
    create_test_user(&app, "alice", "alice@example.com").await;

    for _ in 0..2 {
        app.server
            .post("/api/password/request-reset/")
            .json(&json!({ "email": "alice@example.com" }))
            .await
            .assert_status_ok();
    }

    let response = app
        .server
        .post("/api/password/request-reset/")
        .json(&json!({ "email": "alice@example.com" }))
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(body["error"], "Too many attempts");
    assert_eq!(body["attemptCount"], 3);
    let wait = body["waitTime"].as_u64().unwrap();
    assert!((1..=5).contains(&wait), "waitTime was {wait}");
    assert_eq!(
        body["detail"],
        format!("Please wait {wait} seconds before trying again")
    );
    assert_eq!(app.sent_emails().len(), 2);
}
