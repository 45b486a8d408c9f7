/**
 * Error Conversion
 *
 * This module provides conversion implementations for backend errors,
 * allowing them to be converted to HTTP responses.
 *
 * # Response Format
 *
 * The body shape depends on the error kind:
 *
 * | Variant | Body |
 * |---|---|
 * | `HandlerError` | `{"error": "..."}` |
 * | `DetailedError` | `{"error": "...", "detail": "..."}` |
 * | validation | `{"field": ["message", ...]}` |
 * | `Throttled` | `{"detail": "...", "waitTime": n[, "error": "...", "attemptCount": n]}` |
 * | `InvalidToken` | `{"detail": "...", "code": "token_not_valid"}` |
 * | `Unauthenticated` / `NotFound` | `{"detail": "..."}` |
 * | store | `{"error": "An unexpected error occurred. ..."}` |
 */

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use crate::backend::error::types::BackendError;

impl BackendError {
    /// Render the JSON body for this error
    pub fn body(&self) -> Value {
        match self {
            Self::HandlerError { message, .. } => json!({ "error": message }),
            Self::DetailedError { error, detail, .. } => json!({
                "error": error,
                "detail": detail,
            }),
            Self::Throttled {
                error,
                detail,
                wait_seconds,
                attempt_count,
            } => {
                let mut body = Map::new();
                if let Some(error) = error {
                    body.insert("error".into(), json!(error));
                }
                body.insert("detail".into(), json!(detail));
                body.insert("waitTime".into(), json!(wait_seconds));
                if let Some(count) = attempt_count {
                    body.insert("attemptCount".into(), json!(count));
                }
                Value::Object(body)
            }
            Self::InvalidToken { detail } => json!({
                "detail": detail,
                "code": "token_not_valid",
            }),
            Self::Unauthenticated | Self::NotFound => json!({ "detail": self.message() }),
            Self::SharedError(err) => json!(err.field_errors()),
            Self::DatabaseError(_) => json!({ "error": self.message() }),
        }
    }
}

/// Whether a store error is a UNIQUE constraint violation
///
/// Handlers pre-check uniqueness for friendly messages; this catches the
/// race where two requests pass the check at once.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

impl IntoResponse for BackendError {
    /// Convert a backend error into an HTTP response
    ///
    /// Server-side errors are logged with their cause before the generic
    /// body is sent. Throttled responses carry a `Retry-After` header.
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self);
        }

        let mut response = (status, Json(self.body())).into_response();

        if let Self::Throttled { wait_seconds, .. } = &self {
            if let Ok(value) = HeaderValue::from_str(&wait_seconds.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}
