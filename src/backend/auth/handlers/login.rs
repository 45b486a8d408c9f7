/**
 * Token Handler
 *
 * This module implements the login handler for POST /api/token/.
 *
 * # Authentication Process
 *
 * 1. Look up user by username, then by email
 * 2. Verify password using bcrypt
 * 3. Reject inactive accounts
 * 4. Issue an access/refresh pair
 * 5. With `remember_me`, store the refresh token and add expiry hints
 *
 * # Errors
 *
 * Every failure is a 400 with `{"error": "..."}`; the message says whether
 * the account was missing, the password wrong or the account inactive.
 */
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::backend::auth::passwords::verify_password;
use crate::backend::auth::remember_me::upsert_token;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::find_user_by_login;
use crate::backend::error::{BackendError, INTERNAL_ERROR};

pub const ACCOUNT_NOT_FOUND: &str = "Account not found. Please check your username or email.";
pub const INVALID_PASSWORD: &str = "Invalid password.";
pub const ACCOUNT_INACTIVE: &str = "This account is inactive.";
pub const CREDENTIALS_REQUIRED: &str = "Login and password are required.";

/// Login handler
///
/// # Arguments
///
/// * `State(pool)` - Database connection pool
/// * `State(tokens)` - Token issuer
/// * `Json(request)` - `login` (username or email), `password`, optional `remember_me`
///
/// # Example Request
///
/// ```http
/// POST /api/token/ HTTP/1.1
/// Content-Type: application/json
///
/// { "login": "alice@example.com", "password": "s3cret-pass", "remember_me": true }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "access": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "refresh": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "access_expires": "2026-11-13T10:00:00Z",
///   "refresh_expires": "2026-12-13T10:00:00Z"
/// }
/// ```
pub async fn login(
    State(pool): State<SqlitePool>,
    State(tokens): State<TokenIssuer>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    let remember_me = request.wants_remember_me();
    let login = request.login.as_deref().map(str::trim).unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();

    if login.is_empty() || password.is_empty() {
        tracing::warn!("Login request missing credentials");
        return Err(BackendError::handler(StatusCode::BAD_REQUEST, CREDENTIALS_REQUIRED));
    }

    tracing::info!("Login request for: {}", login);

    let user = find_user_by_login(&pool, login).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", login);
        BackendError::handler(StatusCode::BAD_REQUEST, ACCOUNT_NOT_FOUND)
    })?;

    if !verify_password(password, &user.password_hash) {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(BackendError::handler(StatusCode::BAD_REQUEST, INVALID_PASSWORD));
    }

    if !user.is_active {
        tracing::warn!("Login attempt for inactive user: {}", user.username);
        return Err(BackendError::handler(StatusCode::BAD_REQUEST, ACCOUNT_INACTIVE));
    }

    let now = Utc::now();
    let pair = tokens.issue_pair(user.id, &user.username, remember_me, now).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    })?;

    let mut response = TokenResponse {
        access: pair.access,
        refresh: pair.refresh,
        access_expires: None,
        refresh_expires: None,
    };

    if remember_me {
        upsert_token(&pool, user.id, &response.refresh, now).await?;
        response.access_expires = Some(pair.access_expires);
        response.refresh_expires = Some(pair.refresh_expires);
        tracing::info!("Remember-me token stored for user: {}", user.username);
    }

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    Ok(Json(response))
}
