/**
 * Token Refresh Handler
 *
 * POST /api/token/refresh/ trades a valid refresh token for a new access
 * token. The refresh token's user must still exist and be active.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{RefreshRequest, RefreshResponse};
use crate::backend::auth::sessions::{SessionError, TokenIssuer};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{BackendError, INTERNAL_ERROR};
use crate::shared::error::{BLANK, REQUIRED};

/// Refresh handler
///
/// # Errors
///
/// * `400 Bad Request` - `refresh` missing or blank
/// * `401 Unauthorized` - Token invalid, expired, of the wrong type, or its user is gone
pub async fn refresh(
    State(pool): State<SqlitePool>,
    State(tokens): State<TokenIssuer>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, BackendError> {
    let refresh_token = match request.refresh.as_deref().map(str::trim) {
        None => return Err(BackendError::field("refresh", REQUIRED)),
        Some("") => return Err(BackendError::field("refresh", BLANK)),
        Some(token) => token,
    };

    let (access, claims) = tokens.refresh_access(refresh_token, Utc::now()).map_err(|e| {
        tracing::warn!("Refresh rejected: {}", e);
        match e {
            SessionError::Signing(_) => {
                BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
            _ => BackendError::invalid_token("Token is invalid or expired"),
        }
    })?;

    let user_id = claims.user_id().map_err(|_| BackendError::invalid_token("Token is invalid or expired"))?;
    match get_user_by_id(&pool, user_id).await? {
        Some(user) if user.is_active => {
            tracing::info!("Access token refreshed for user: {}", user.username);
            Ok(Json(RefreshResponse { access }))
        }
        _ => {
            tracing::warn!("Refresh token for missing or inactive user: {}", user_id);
            Err(BackendError::invalid_token("User not found or inactive"))
        }
    }
}
