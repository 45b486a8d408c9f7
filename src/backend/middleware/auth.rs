/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT access tokens from the
 * Authorization header and provides the user to handlers.
 *
 * A request is authenticated when:
 * 1. It carries `Authorization: Bearer <token>`
 * 2. The token is a valid, unexpired access token
 * 3. The user it names still exists and is active
 */

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::sessions::{SessionError, TokenIssuer, TokenType};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the user behind a request's bearer token
///
/// # Errors
///
/// * `Unauthenticated` - No bearer token
/// * `InvalidToken` - Bad token, or its user is gone or inactive
pub async fn authenticate(
    tokens: &TokenIssuer,
    pool: &SqlitePool,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, BackendError> {
    let token = bearer_token(headers).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        BackendError::Unauthenticated
    })?;

    let claims = tokens.verify(token, TokenType::Access).map_err(|e| {
        tracing::warn!("Invalid token: {}", e);
        match e {
            SessionError::WrongType => BackendError::invalid_token("Token has wrong type"),
            _ => BackendError::invalid_token("Given token not valid for any token type"),
        }
    })?;

    let user_id = claims.user_id().map_err(|_| {
        tracing::warn!("Invalid user ID in token: {}", claims.sub);
        BackendError::invalid_token("Token contained no recognizable user identification")
    })?;

    let user = get_user_by_id(pool, user_id).await?.ok_or_else(|| {
        tracing::warn!("User not found in database: {}", user_id);
        BackendError::invalid_token("User not found")
    })?;

    if !user.is_active {
        tracing::warn!("Token presented for inactive user: {}", user.username);
        return Err(BackendError::invalid_token("User is inactive"));
    }

    Ok(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
    })
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts JWT token from Authorization header
/// 2. Verifies the token and that its user is still active
/// 3. Attaches user data to request extensions for use in handlers
///
/// Returns 401 Unauthorized if token is missing or invalid
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let user = authenticate(&app_state.tokens, &app_state.db_pool, request.headers()).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Extract authenticated user from request extensions
///
/// This is a helper function for handlers to get the authenticated user
/// that was set by the auth middleware.
pub fn extract_authenticated_user(parts: &Parts) -> Result<AuthenticatedUser, BackendError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| {
            tracing::warn!("AuthenticatedUser not found in request extensions");
            BackendError::Unauthenticated
        })
}

/// Axum extractor for authenticated user
///
/// This can be used as a parameter in handlers behind `auth_middleware`
/// to extract the authenticated user from request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_authenticated_user(parts).map(AuthUser)
    }
}

/// Extractor for an optional authenticated caller
///
/// Resolves the bearer token itself, so it works on public routes. Any
/// failure yields `None`: the caller is treated as anonymous.
#[derive(Clone, Debug)]
pub struct MaybeAuthUser(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(Self(Some(user.clone())));
        }
        if bearer_token(&parts.headers).is_none() {
            return Ok(Self(None));
        }

        let app_state = AppState::from_ref(state);
        Ok(Self(resolve_optional(&app_state, &parts.headers).await))
    }
}

/// Like [`authenticate`], but any failure yields `None`
///
/// Store failures are logged as errors; token problems were already logged
/// as warnings by [`authenticate`].
async fn resolve_optional(app_state: &AppState, headers: &HeaderMap) -> Option<AuthenticatedUser> {
    match authenticate(&app_state.tokens, &app_state.db_pool, headers).await {
        Ok(user) => Some(user),
        Err(err) if err.is_server_error() => {
            tracing::error!("Treating caller as anonymous after auth lookup failed: {}", err);
            None
        }
        Err(err) => {
            tracing::debug!("Treating caller as anonymous: {}", err);
            None
        }
    }
}
