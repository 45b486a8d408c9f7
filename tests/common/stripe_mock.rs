//! Stripe API mocks
//!
//! Wiremock responders for `POST /v1/payment_intents`.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::database::TEST_SECRET_KEY;

/// Start a mock Stripe API that accepts payment intents
pub async fn mock_stripe_success(intent_id: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .and(header("authorization", format!("Bearer {TEST_SECRET_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": intent_id,
            "object": "payment_intent",
            "client_secret": format!("{intent_id}_secret_test"),
            "amount": 14999,
            "currency": "usd",
            "status": "requires_payment_method"
        })))
        .mount(&server)
        .await;

    server
}

/// Start a mock Stripe API that rejects every payment intent
pub async fn mock_stripe_error(status: u16, message: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "error": { "type": "invalid_request_error", "message": message }
        })))
        .mount(&server)
        .await;

    server
}
