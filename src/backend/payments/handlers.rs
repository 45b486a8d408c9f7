/**
 * Payment Handlers
 *
 * - `POST /api/payments/create-payment-intent/` (bearer) creates a Stripe
 *   payment intent and a `pending` payment record
 * - `POST /api/payments/confirm-payment/{id}/` (bearer) marks the caller's
 *   payment `completed`
 * - `GET /api/payments/config/` (public) returns the publishable key
 *
 * Creation failures of any kind a client can cause, including processor
 * rejections, are answered 400 `{"error": "..."}`.
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use super::amount::{format_cents, parse_amount_cents};
use super::db::{complete_payment_for_user, insert_payment, PLAN_TYPE_MAX_LEN};
use super::stripe::{NewPaymentIntent, StripeClient, StripeError};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::AppConfig;

const CURRENCY: &str = "usd";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePaymentRequest {
    pub amount: Option<Value>,
    #[serde(rename = "planType")]
    pub plan_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePaymentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
    pub payment_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfirmPaymentResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StripeConfigResponse {
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

fn bad_request(message: impl Into<String>) -> BackendError {
    BackendError::handler(StatusCode::BAD_REQUEST, message)
}

fn validate_plan_type(plan_type: Option<&str>) -> Result<&str, BackendError> {
    let plan_type = plan_type.map(str::trim).filter(|p| !p.is_empty());
    match plan_type {
        None => Err(bad_request("planType is required.")),
        Some(p) if p.chars().count() > PLAN_TYPE_MAX_LEN => Err(bad_request(format!(
            "Ensure planType has no more than {PLAN_TYPE_MAX_LEN} characters."
        ))),
        Some(p) => Ok(p),
    }
}

/// Create a payment intent for the caller
///
/// # Example Request
///
/// ```http
/// POST /api/payments/create-payment-intent/ HTTP/1.1
/// Authorization: Bearer <access token>
/// Content-Type: application/json
///
/// { "amount": 149.99, "planType": "single" }
/// ```
///
/// # Example Response
///
/// ```json
/// { "clientSecret": "pi_3N..._secret_...", "payment_id": 12 }
/// ```
pub async fn create_payment_intent(
    State(pool): State<SqlitePool>,
    State(stripe): State<StripeClient>,
    AuthUser(auth): AuthUser,
    body: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentResponse>, BackendError> {
    let Json(request) = body.map_err(|rejection| bad_request(rejection.body_text()))?;

    let amount_cents = parse_amount_cents(request.amount.as_ref()).map_err(|e| {
        tracing::warn!("Invalid payment amount from {}: {}", auth.username, e);
        bad_request(e.to_string())
    })?;
    let plan_type = validate_plan_type(request.plan_type.as_deref())?;

    tracing::info!(
        "Creating payment intent for {}: ${} ({})",
        auth.username,
        format_cents(amount_cents),
        plan_type
    );

    let intent = stripe
        .create_payment_intent(&NewPaymentIntent {
            amount_cents,
            currency: CURRENCY,
            user_id: auth.user_id,
            plan_type,
        })
        .await
        .map_err(|e| {
            match &e {
                StripeError::Request(inner) => tracing::error!("Stripe request failed: {}", inner),
                other => tracing::warn!("Payment intent not created: {}", other),
            }
            bad_request(e.to_string())
        })?;

    let payment = insert_payment(&pool, auth.user_id, amount_cents, &intent.id, plan_type, Utc::now()).await?;
    tracing::info!("Payment {} recorded for intent {}", payment.id, intent.id);

    Ok(Json(CreatePaymentResponse {
        client_secret: intent.client_secret,
        payment_id: payment.id,
    }))
}

/// Mark one of the caller's payments completed
///
/// Ids that are not integers, do not exist or belong to someone else all
/// answer 404.
pub async fn confirm_payment(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ConfirmPaymentResponse>, BackendError> {
    let payment_id: i64 = id.parse().map_err(|_| BackendError::NotFound)?;

    if !complete_payment_for_user(&pool, payment_id, auth.user_id).await? {
        tracing::warn!("Payment {} not found for {}", payment_id, auth.username);
        return Err(BackendError::NotFound);
    }

    tracing::info!("Payment {} confirmed by {}", payment_id, auth.username);
    Ok(Json(ConfirmPaymentResponse {
        status: "success".to_string(),
    }))
}

pub async fn get_stripe_config(State(config): State<Arc<AppConfig>>) -> Json<StripeConfigResponse> {
    Json(StripeConfigResponse {
        public_key: config.stripe.publishable_key.clone(),
    })
}
