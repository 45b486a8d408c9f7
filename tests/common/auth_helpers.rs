//! Authentication test helpers
//!
//! Provides utilities for creating test users, generating tokens,
//! and testing authentication flows.

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use super::TestApp;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub access: String,
    pub refresh: String,
}

/// Register a user through the API and log in
pub async fn create_test_user(app: &TestApp, username: &str, email: &str) -> TestUser {
    let response = app
        .server
        .post("/api/user/register/")
        .json(&json!({
            "username": username,
            "email": email,
            "password": TEST_PASSWORD,
            "confirm_password": TEST_PASSWORD,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let user: Value = response.json();
    let id = user["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("Registration should return a UUID id");

    let (access, refresh) = login(app, username, TEST_PASSWORD).await;

    TestUser {
        id,
        username: username.to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        access,
        refresh,
    }
}

/// Create a test user with a unique username and email
pub async fn create_unique_test_user(app: &TestApp) -> TestUser {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("user_{}", &suffix[..12]);
    let email = format!("{username}@example.com");
    create_test_user(app, &username, &email).await
}

/// Log in and return the access and refresh tokens
pub async fn login(app: &TestApp, login: &str, password: &str) -> (String, String) {
    let response = app
        .server
        .post("/api/token/")
        .json(&json!({ "login": login, "password": password }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    (
        body["access"].as_str().expect("access token").to_string(),
        body["refresh"].as_str().expect("refresh token").to_string(),
    )
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
