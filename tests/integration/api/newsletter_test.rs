//! Newsletter API integration tests

use axum::http::{HeaderName, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_unique_test_user, TestApp};

fn forwarded_for(ip: &'static str) -> (HeaderName, HeaderValue) {
    (HeaderName::from_static("x-forwarded-for"), HeaderValue::from_static(ip))
}

#[tokio::test]
async fn test_subscribe_and_duplicate() {
    let app = TestApp::new().await;
    let (name, value) = forwarded_for("198.51.100.1");

    let response = app
        .server
        .post("/newsletter/subscribe")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "email": "reader@example.com" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!({ "message": "Successfully subscribed to newsletter" }));

    let response = app
        .server
        .post("/newsletter/subscribe")
        .add_header(name, value)
        .json(&json!({ "email": "reader@example.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "This email is already subscribed" }));
}

#[tokio::test]
async fn test_invalid_email() {
    let app = TestApp::new().await;
    let (name, value) = forwarded_for("198.51.100.2");

    let response = app
        .server
        .post("/newsletter/subscribe")
        .add_header(name, value)
        .json(&json!({ "email": "not an email" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "email": ["Enter a valid email address."] }));
}

#[tokio::test]
async fn test_fourth_anonymous_request_is_throttled() {
    let app = TestApp::new().await;

    for i in 0..3 {
        let (name, value) = forwarded_for("203.0.113.7");
        app.server
            .post("/newsletter/subscribe")
            .add_header(name, value)
            .json(&json!({ "email": format!("reader{i}@example.com") }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    // Rejected even though the email is invalid
    let (name, value) = forwarded_for("203.0.113.7");
    let response = app
        .server
        .post("/newsletter/subscribe")
        .add_header(name, value)
        .json(&json!({ "email": "garbage" }))
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    let wait = body["waitTime"].as_u64().unwrap();
    assert!(wait > 3500 && wait <= 3600, "waitTime was {wait}");
    assert_eq!(
        body["detail"],
        format!("Request was throttled. Expected available in {wait} seconds.")
    );
    assert!(response.headers().contains_key("retry-after"));

    // Another client has its own budget
    let (name, value) = forwarded_for("203.0.113.8");
    app.server
        .post("/newsletter/subscribe")
        .add_header(name, value)
        .json(&json!({ "email": "other@example.com" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_authenticated_requests_are_not_throttled() {
    let app = TestApp::new().await;
    let user = create_unique_test_user(&app).await;

    for i in 0..5 {
        let (name, value) = forwarded_for("192.0.2.50");
        app.server
            .post("/newsletter/subscribe")
            .add_header(name, value)
            .authorization_bearer(&user.access)
            .json(&json!({ "email": format!("member{i}@example.com") }))
            .await
            .assert_status(StatusCode::CREATED);
    }
}
