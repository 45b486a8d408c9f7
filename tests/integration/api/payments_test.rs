//! Payments API integration tests
//!
//! Stripe is replaced by a wiremock server.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{
    create_unique_test_user, mock_stripe_error, mock_stripe_success, TestApp, TEST_PUBLISHABLE_KEY,
};
use notes_backend::backend::payments::db::get_payment_for_user;
use notes_backend::backend::payments::PaymentStatus;

#[tokio::test]
async fn test_stripe_config_is_public() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/payments/config/").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "publicKey": TEST_PUBLISHABLE_KEY }));
}

#[tokio::test]
async fn test_create_and_confirm_payment() {
    let stripe = mock_stripe_success("pi_test_123").await;
    let app = TestApp::with_stripe(&stripe.uri()).await;
    let user = create_unique_test_user(&app).await;

    let response = app
        .server
        .post("/api/payments/create-payment-intent/")
        .authorization_bearer(&user.access)
        .json(&json!({ "amount": 149.99, "planType": "single" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["clientSecret"], "pi_test_123_secret_test");
    let payment_id = body["payment_id"].as_i64().unwrap();

    let payment = get_payment_for_user(app.pool(), payment_id, user.id).await.unwrap().unwrap();
    assert_eq!(payment.amount_cents, 14999);
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(payment.payment_intent_id, "pi_test_123");
    assert_eq!(payment.plan_type, "single");

    let response = app
        .server
        .post(&format!("/api/payments/confirm-payment/{payment_id}/"))
        .authorization_bearer(&user.access)
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "success" }));

    let payment = get_payment_for_user(app.pool(), payment_id, user.id).await.unwrap().unwrap();
    assert_eq!(payment.status, PaymentStatus::Completed);
}

#[tokio::test]
async fn test_confirm_other_users_payment_is_not_found() {
    let stripe = mock_stripe_success("pi_test_456").await;
    let app = TestApp::with_stripe(&stripe.uri()).await;
    let owner = create_unique_test_user(&app).await;
    let other = create_unique_test_user(&app).await;

    let body: Value = app
        .server
        .post("/api/payments/create-payment-intent/")
        .authorization_bearer(&owner.access)
        .json(&json!({ "amount": "20.00", "planType": "bundle" }))
        .await
        .json();
    let payment_id = body["payment_id"].as_i64().unwrap();

    app.server
        .post(&format!("/api/payments/confirm-payment/{payment_id}/"))
        .authorization_bearer(&other.access)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let payment = get_payment_for_user(app.pool(), payment_id, owner.id).await.unwrap().unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);

    app.server
        .post("/api/payments/confirm-payment/99999/")
        .authorization_bearer(&owner.access)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_processor_error_is_bad_request() {
    let stripe = mock_stripe_error(400, "Amount must be at least $0.50 usd").await;
    let app = TestApp::with_stripe(&stripe.uri()).await;
    let user = create_unique_test_user(&app).await;

    let response = app
        .server
        .post("/api/payments/create-payment-intent/")
        .authorization_bearer(&user.access)
        .json(&json!({ "amount": 0.1, "planType": "single" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Amount must be at least $0.50 usd" }));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM payments")
        .fetch_one(app.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_invalid_payment_requests() {
    let stripe = mock_stripe_success("pi_unused").await;
    let app = TestApp::with_stripe(&stripe.uri()).await;
    let user = create_unique_test_user(&app).await;

    for body in [
        json!({ "planType": "single" }),
        json!({ "amount": "abc", "planType": "single" }),
        json!({ "amount": -1, "planType": "single" }),
        json!({ "amount": 10 }),
        json!({ "amount": 10, "planType": "x".repeat(21) }),
    ] {
        let response = app
            .server
            .post("/api/payments/create-payment-intent/")
            .authorization_bearer(&user.access)
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert!(error["error"].is_string(), "body {body}");
    }
}

#[tokio::test]
async fn test_missing_secret_key() {
    let app = TestApp::new().await;
    let user = create_unique_test_user(&app).await;

    let response = app
        .server
        .post("/api/payments/create-payment-intent/")
        .authorization_bearer(&user.access)
        .json(&json!({ "amount": 10, "planType": "single" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("STRIPE_SECRET_KEY"));
}

#[tokio::test]
async fn test_payments_require_authentication() {
    let app = TestApp::new().await;

    app.server
        .post("/api/payments/create-payment-intent/")
        .json(&json!({ "amount": 10, "planType": "single" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .post("/api/payments/confirm-payment/1/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
