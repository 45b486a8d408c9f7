/**
 * Newsletter Signup Handler
 *
 * POST /newsletter/subscribe stores an email address once.
 *
 * Anonymous callers are limited to 3 requests per hour per client
 * ([`NEWSLETTER`]). The limit is checked before the body is looked at, so a
 * throttled client is rejected whether or not its email would have been
 * accepted. Callers with a valid access token are not counted.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::db::{insert_subscriber, is_subscribed};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::middleware::MaybeAuthUser;
use crate::backend::throttle::{check_and_record, ClientIdent, Decision, NEWSLETTER};
use crate::shared::validation::{is_valid_email, required};
use crate::shared::FieldErrors;

pub const SUBSCRIBED: &str = "Successfully subscribed to newsletter";
pub const ALREADY_SUBSCRIBED: &str = "This email is already subscribed";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub message: String,
}

fn validate_email(request: &SubscribeRequest) -> Result<&str, FieldErrors> {
    let mut errors = FieldErrors::new();
    let Some(email) = required(&mut errors, "email", request.email.as_deref()).map(str::trim) else {
        return Err(errors);
    };
    if !is_valid_email(email) {
        errors.add("email", INVALID_EMAIL);
        return Err(errors);
    }
    Ok(email)
}

/// Subscribe an email address
///
/// # Example Request
///
/// ```http
/// POST /newsletter/subscribe HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "reader@example.com" }
/// ```
///
/// # Responses
///
/// - 201 `{"message": "Successfully subscribed to newsletter"}`
/// - 400 `{"error": "This email is already subscribed"}` or `{"email": [...]}`
/// - 429 `{"detail": "...", "waitTime": n}`
pub async fn subscribe(
    State(pool): State<SqlitePool>,
    MaybeAuthUser(caller): MaybeAuthUser,
    ClientIdent(ident): ClientIdent,
    body: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubscribeResponse>), BackendError> {
    if caller.is_none() {
        if let Decision::Deny { wait_seconds } = check_and_record(&pool, &NEWSLETTER, &ident, Utc::now()).await? {
            return Err(BackendError::Throttled {
                error: None,
                detail: format!("Request was throttled. Expected available in {wait_seconds} seconds."),
                wait_seconds,
                attempt_count: None,
            });
        }
    }

    let Json(request) = body.map_err(|rejection| {
        tracing::warn!("Malformed newsletter request: {}", rejection);
        BackendError::handler(rejection.status(), rejection.body_text())
    })?;

    let email = validate_email(&request).map_err(|errors| {
        tracing::warn!("Invalid newsletter signup: {}", errors);
        BackendError::validation(errors)
    })?;

    let duplicate = || {
        tracing::warn!("Newsletter email already subscribed: {}", email);
        BackendError::handler(StatusCode::BAD_REQUEST, ALREADY_SUBSCRIBED)
    };

    if is_subscribed(&pool, email).await? {
        return Err(duplicate());
    }

    match insert_subscriber(&pool, email, Utc::now()).await {
        Ok(subscriber) => {
            tracing::info!("Newsletter subscriber {} added", subscriber.id);
            Ok((
                StatusCode::CREATED,
                Json(SubscribeResponse {
                    message: SUBSCRIBED.to_string(),
                }),
            ))
        }
        Err(e) if is_unique_violation(&e) => Err(duplicate()),
        Err(e) => Err(e.into()),
    }
}
