/**
 * Password Reset Handlers
 *
 * HTTP handlers for POST /api/password/request-reset/ and
 * POST /api/password/verify-reset/.
 *
 * Both routes are public. Every failure is answered with
 * `{"error": ..., "detail": ...}`; server-side causes are logged and
 * replaced with a generic detail.
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::service::{request_reset, verify_reset, ResetError};
use crate::backend::error::BackendError;
use crate::backend::mail::Mailer;
use crate::shared::AppConfig;

pub const RESET_REQUESTED: &str = "If an account exists with this email, you will receive a reset code.";
pub const RESET_COMPLETE: &str = "Password reset successful. You can now log in with your new password.";

const SERVER_ERROR: &str = "Server error";
const INVALID_CODE: &str = "Invalid reset code";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResetRequest {
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyResetRequest {
    pub email: Option<String>,
    pub code: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Request a reset code
///
/// # Arguments
///
/// * `State(pool)` - Database connection pool
/// * `State(mailer)` - Outgoing mail transport
/// * `Json(request)` - `{"email": "..."}`
///
/// # Returns
///
/// The same generic message whether or not the account exists, or 429 with
/// `waitTime` and `attemptCount` inside the cooldown.
pub async fn request_reset_handler(
    State(pool): State<SqlitePool>,
    State(mailer): State<Mailer>,
    Json(request): Json<ResetRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let Some(email) = non_blank(&request.email) else {
        tracing::warn!("Password reset requested without an email");
        return Err(BackendError::detailed(
            StatusCode::BAD_REQUEST,
            "Email is required",
            "Please provide an email address to reset your password.",
        ));
    };

    tracing::info!("Password reset request for: {}", email);

    match request_reset(&pool, &mailer, email, Utc::now()).await {
        Ok(_) => Ok(Json(MessageResponse {
            message: RESET_REQUESTED.to_string(),
        })),
        Err(ResetError::Throttled(cooldown)) => Err(BackendError::Throttled {
            error: Some("Too many attempts".to_string()),
            detail: format!("Please wait {} seconds before trying again", cooldown.wait_seconds),
            wait_seconds: cooldown.wait_seconds,
            attempt_count: Some(cooldown.attempt_count),
        }),
        Err(ResetError::Mail(e)) => {
            tracing::error!("Failed to send reset email to {}: {}", email, e);
            Err(BackendError::detailed(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send email",
                "There was an error sending the reset code. Please try again later.",
            ))
        }
        Err(e) => {
            tracing::error!("Unexpected error during password reset request: {}", e);
            Err(BackendError::detailed(
                StatusCode::INTERNAL_SERVER_ERROR,
                SERVER_ERROR,
                "An unexpected error occurred. Please try again later.",
            ))
        }
    }
}

/// Verify a reset code and set the new password
///
/// # Example Request
///
/// ```http
/// POST /api/password/verify-reset/ HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "alice@example.com", "code": "042917", "new_password": "n3w-pass" }
/// ```
pub async fn verify_reset_handler(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<VerifyResetRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let email = non_blank(&request.email);
    let code = non_blank(&request.code);
    let new_password = request.new_password.as_deref().filter(|p| !p.is_empty());

    let (Some(email), Some(code), Some(new_password)) = (email, code, new_password) else {
        tracing::warn!("Password reset verification missing fields");
        return Err(BackendError::detailed(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "Email, code, and new password are required.",
        ));
    };

    match verify_reset(&pool, email, code, new_password, config.bcrypt_cost, Utc::now()).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: RESET_COMPLETE.to_string(),
        })),
        Err(ResetError::InvalidCode) => Err(BackendError::detailed(
            StatusCode::BAD_REQUEST,
            INVALID_CODE,
            "The reset code is invalid or has expired. Please request a new one.",
        )),
        Err(e) => {
            tracing::error!("Unexpected error during password reset verification: {}", e);
            Err(BackendError::detailed(
                StatusCode::INTERNAL_SERVER_ERROR,
                SERVER_ERROR,
                "An unexpected error occurred while resetting your password. Please try again.",
            ))
        }
    }
}
