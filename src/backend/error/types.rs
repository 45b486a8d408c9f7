/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Types
 *
 * - `HandlerError` - A request failed with a single message
 * - `DetailedError` - A request failed with a short error and a longer detail
 * - `Throttled` - A rate limit or cooldown rejected the request
 * - `InvalidToken` - A bearer or refresh token failed verification
 * - `Unauthenticated` - A protected route was called without credentials
 * - `NotFound` - The resource does not exist or is not owned by the caller
 * - `SharedError` - Validation errors from the shared module
 * - `DatabaseError` - The store failed
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * Client errors carry a message meant for the caller:
 * - Missing or invalid fields (field map)
 * - Wrong credentials
 * - Throttled requests (with a wait time)
 *
 * ## Server Errors
 *
 * Server errors are logged with their cause and answered with a generic
 * message, so SQL text and transport errors never reach the client.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::{FieldErrors, SharedError};

/// Generic message for unexpected server-side failures
pub const INTERNAL_ERROR: &str = "An unexpected error occurred. Please try again later.";

/// Backend-specific error types
///
/// This enum represents all possible errors that can occur in the backend.
/// Each variant includes relevant context and can be converted to an HTTP response.
///
/// # Usage
///
/// ```rust
/// use notes_backend::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// // Create a handler error
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
///
/// // Create a not found error
/// let err = BackendError::NotFound;
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., bad credentials, processor rejection)
    ///
    /// Rendered as `{"error": message}`.
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Handler error with a short error and a longer explanation
    ///
    /// Rendered as `{"error": error, "detail": detail}`.
    #[error("{error}: {detail}")]
    DetailedError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Short error title
        error: String,
        /// Longer explanation for the user
        detail: String,
    },

    /// Request rejected by a throttle
    ///
    /// Rendered as 429 with `waitTime` (whole seconds) and a `Retry-After`
    /// header.
    #[error("Throttled: {detail}")]
    Throttled {
        /// Short error title, if the endpoint reports one
        error: Option<String>,
        /// Human-readable explanation
        detail: String,
        /// Seconds until the request would be accepted
        wait_seconds: u64,
        /// Number of the attempt that was rejected, if tracked
        attempt_count: Option<u32>,
    },

    /// Token failed signature, expiry or type checks
    #[error("Invalid token: {detail}")]
    InvalidToken {
        /// Human-readable explanation
        detail: String,
    },

    /// Protected route called without credentials
    #[error("Authentication credentials were not provided.")]
    Unauthenticated,

    /// Resource missing or owned by another user
    #[error("Not found.")]
    NotFound,

    /// Shared error (from shared module)
    ///
    /// This error wraps field validation errors from the shared module.
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new error with a short title and a longer detail
    pub fn detailed(status: StatusCode, error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::DetailedError {
            status,
            error: error.into(),
            detail: detail.into(),
        }
    }

    /// Create a 400 error whose body is a field → messages map
    pub fn validation(errors: FieldErrors) -> Self {
        Self::SharedError(SharedError::InvalidFields(errors))
    }

    /// Create a 400 error for a single field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SharedError(SharedError::validation(field, message))
    }

    /// Create a token verification error
    pub fn invalid_token(detail: impl Into<String>) -> Self {
        Self::InvalidToken {
            detail: detail.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` / `DetailedError` - Uses the status code from the error
    /// - `Throttled` - 429 Too Many Requests
    /// - `InvalidToken` / `Unauthenticated` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `SharedError` - 400 Bad Request
    /// - `DatabaseError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::DetailedError { status, .. } => *status,
            Self::Throttled { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::InvalidToken { .. } | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Server-side failures return [`INTERNAL_ERROR`] instead of their cause.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::DetailedError { error, .. } => error.clone(),
            Self::Throttled { detail, .. } => detail.clone(),
            Self::InvalidToken { detail } => detail.clone(),
            Self::Unauthenticated | Self::NotFound => self.to_string(),
            Self::SharedError(err) => err.to_string(),
            Self::DatabaseError(_) => INTERNAL_ERROR.to_string(),
        }
    }

    /// Whether this error is the server's fault and should be logged as such
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}
