/**
 * Registration Handler
 *
 * This module implements the user registration handler for POST /api/user/register/.
 *
 * # Registration Process
 *
 * 1. Check required fields and formats, collecting every field error
 * 2. Check that username and email are not taken
 * 3. Hash password using bcrypt
 * 4. Create user in database
 * 5. Return the public user fields with 201 Created
 *
 * # Validation
 *
 * - `username`: required, at most 150 letters, digits or `@ . + - _`, unique
 * - `email`: required, valid address, unique
 * - `password`: required, not blank
 * - `confirm_password`: optional, must equal `password` when given
 *
 * Failures are answered with 400 and a `{field: [messages]}` map.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::backend::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::backend::auth::passwords::hash_password;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::shared::validation::{is_valid_email, is_valid_username, required, USERNAME_MAX_LEN};
use crate::shared::{AppConfig, FieldErrors};

pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
pub const EMAIL_TAKEN: &str = "A user with that email already exists.";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// Register handler
///
/// # Arguments
///
/// * `State(pool)` - Database connection pool
/// * `State(config)` - Application config (bcrypt cost)
/// * `Json(request)` - Registration fields
///
/// # Errors
///
/// * `400 Bad Request` - Missing, malformed or duplicate fields
/// * `500 Internal Server Error` - Hashing or store failure
///
/// # Example Request
///
/// ```http
/// POST /api/user/register/ HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "s3cret-pass",
///   "confirm_password": "s3cret-pass"
/// }
/// ```
pub async fn register(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    let mut errors = FieldErrors::new();

    let username = required(&mut errors, "username", request.username.as_deref()).map(str::trim);
    let email = required(&mut errors, "email", request.email.as_deref()).map(str::trim);
    let password = required(&mut errors, "password", request.password.as_deref());

    if let Some(username) = username {
        if username.chars().count() > USERNAME_MAX_LEN {
            errors.add("username", format!("Ensure this field has no more than {USERNAME_MAX_LEN} characters."));
        } else if !is_valid_username(username) {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        } else if get_user_by_username(&pool, username).await?.is_some() {
            errors.add("username", USERNAME_TAKEN);
        }
    }

    if let Some(email) = email {
        if !is_valid_email(email) {
            errors.add("email", "Enter a valid email address.");
        } else if get_user_by_email(&pool, email).await?.is_some() {
            errors.add("email", EMAIL_TAKEN);
        }
    }

    if let (Some(password), Some(confirm)) = (password, request.confirm_password.as_deref()) {
        if password != confirm {
            errors.add("confirm_password", PASSWORDS_DO_NOT_MATCH);
        }
    }

    let (username, email, password) = match (errors.is_empty(), username, email, password) {
        (true, Some(username), Some(email), Some(password)) => (username, email, password),
        _ => {
            tracing::warn!("Registration rejected: {}", errors);
            return Err(BackendError::validation(errors));
        }
    };

    tracing::info!("Registration request for username: {}, email: {}", username, email);

    let password_hash = hash_password(password, config.bcrypt_cost)?;

    let user = match create_user(&pool, username, email, &password_hash).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            // Lost a race with a concurrent registration
            tracing::warn!("Unique constraint hit while creating user {}: {}", username, e);
            let mut errors = FieldErrors::new();
            if get_user_by_username(&pool, username).await?.is_some() {
                errors.add("username", USERNAME_TAKEN);
            }
            if get_user_by_email(&pool, email).await?.is_some() {
                errors.add("email", EMAIL_TAKEN);
            }
            if errors.is_empty() {
                errors.add("username", USERNAME_TAKEN);
            }
            return Err(BackendError::validation(errors));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("User created successfully: {} ({})", user.username, user.email);

    Ok((StatusCode::CREATED, Json(user.into())))
}
