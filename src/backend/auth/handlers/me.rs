/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/user/current/, which
 * returns information about the currently authenticated user.
 *
 * # Authentication
 *
 * The route sits behind `auth_middleware`, which has already verified the
 * bearer token and placed the caller in the request extensions.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// Get current user handler
///
/// # Example Response
///
/// ```json
/// {
///   "id": "123e4567-e89b-12d3-a456-426614174000",
///   "username": "alice",
///   "email": "alice@example.com"
/// }
/// ```
pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let user = get_user_by_id(&pool, auth.user_id).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", auth.user_id);
        BackendError::NotFound
    })?;

    Ok(Json(user.into()))
}
