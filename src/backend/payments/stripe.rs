/**
 * Stripe Client
 *
 * Minimal client for the one processor call the backend makes:
 * `POST /v1/payment_intents`. The request is form encoded and authorized
 * with the secret key as a bearer token.
 *
 * The base URL comes from configuration so tests can aim the client at a
 * local mock server.
 */

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::StripeConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("No API key provided. Set STRIPE_SECRET_KEY to accept payments.")]
    MissingSecretKey,
    #[error("{message}")]
    Api { message: String },
    #[error("Payment processor request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// What the backend asks the processor for
#[derive(Debug, Clone)]
pub struct NewPaymentIntent<'a> {
    pub amount_cents: i64,
    pub currency: &'a str,
    pub user_id: Uuid,
    pub plan_type: &'a str,
}

/// The fields of a processor payment intent the backend reads
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    /// Processor lifecycle state, e.g. `requires_payment_method`
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: Option<String>,
    api_base: String,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base", &self.api_base)
            .field("configured", &self.secret_key.is_some())
            .finish()
    }
}

impl StripeClient {
    pub fn new(config: &StripeConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            secret_key: config.secret_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Create a payment intent
    ///
    /// # Errors
    /// * `MissingSecretKey` - no secret key is configured
    /// * `Api` - the processor rejected the request; carries its message
    /// * `Request` - the processor could not be reached or answered garbage
    pub async fn create_payment_intent(&self, intent: &NewPaymentIntent<'_>) -> Result<PaymentIntent, StripeError> {
        let secret_key = self.secret_key.as_deref().ok_or(StripeError::MissingSecretKey)?;

        let amount = intent.amount_cents.to_string();
        let user_id = intent.user_id.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", intent.currency),
            ("metadata[user_id]", user_id.as_str()),
            ("metadata[plan_type]", intent.plan_type),
        ];

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(secret_key)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| format!("Payment processor returned status {}", status.as_u16()));
            tracing::warn!("Stripe rejected payment intent: {} ({})", message, status);
            return Err(StripeError::Api { message });
        }

        let created: PaymentIntent = response.json().await?;
        tracing::info!(
            "Stripe payment intent {} created ({} cents, status {})",
            created.id,
            intent.amount_cents,
            created.status
        );
        Ok(created)
    }
}
