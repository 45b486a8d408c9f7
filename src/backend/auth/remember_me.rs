//! Remember-me token records
//!
//! A login that asks to be remembered stores its refresh token here with a
//! 60-day expiry. Each user has at most one row: later remember-me logins
//! overwrite the token and expiry in place.

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::sessions::REMEMBER_ME_REFRESH_DAYS;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RememberMeToken {
    pub id: i64,
    pub user_id: Uuid,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Insert or overwrite the user's remember-me token
///
/// `created_at` keeps the time of the first remember-me login.
pub async fn upsert_token(
    pool: &SqlitePool,
    user_id: Uuid,
    token: &str,
    now: DateTime<Utc>,
) -> Result<RememberMeToken, sqlx::Error> {
    let expires_at = now + Duration::days(REMEMBER_ME_REFRESH_DAYS);

    sqlx::query_as::<_, RememberMeToken>(
        r#"
        INSERT INTO remember_me_tokens (user_id, token, created_at, expires_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            token = excluded.token,
            expires_at = excluded.expires_at
        RETURNING id, user_id, token, created_at, expires_at
        "#
    )
    .bind(user_id)
    .bind(token)
    .bind(now)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

pub async fn get_token_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Option<RememberMeToken>, sqlx::Error> {
    sqlx::query_as::<_, RememberMeToken>(
        "SELECT id, user_id, token, created_at, expires_at FROM remember_me_tokens WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
