/**
 * Reset Code Records
 *
 * Six-digit one-time codes stored in `password_reset_codes`. A code is
 * valid for 15 minutes and authorizes at most one password change.
 */

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

/// Code lifetime
pub const CODE_LIFETIME_MINUTES: i64 = 15;

/// Number of digits in a code
pub const CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PasswordResetCode {
    pub id: i64,
    pub user_id: Uuid,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

/// Generate a random code of [`CODE_LENGTH`] decimal digits
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Creation times of the user's codes at or after `since`, newest first
pub async fn recent_code_times(
    pool: &SqlitePool,
    user_id: Uuid,
    since: DateTime<Utc>,
) -> Result<Vec<DateTime<Utc>>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT created_at FROM password_reset_codes
        WHERE user_id = ? AND created_at >= ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(pool)
    .await
}

/// Delete the user's unused codes created before `before`
pub async fn delete_stale_codes(
    pool: &SqlitePool,
    user_id: Uuid,
    before: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM password_reset_codes WHERE user_id = ? AND created_at < ? AND used = 0",
    )
    .bind(user_id)
    .bind(before)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Store a new code expiring [`CODE_LIFETIME_MINUTES`] after `now`
pub async fn insert_code(
    pool: &SqlitePool,
    user_id: Uuid,
    code: &str,
    now: DateTime<Utc>,
) -> Result<PasswordResetCode, sqlx::Error> {
    sqlx::query_as::<_, PasswordResetCode>(
        r#"
        INSERT INTO password_reset_codes (user_id, code, created_at, expires_at, used)
        VALUES (?, ?, ?, ?, 0)
        RETURNING id, user_id, code, created_at, expires_at, used
        "#,
    )
    .bind(user_id)
    .bind(code)
    .bind(now)
    .bind(now + Duration::minutes(CODE_LIFETIME_MINUTES))
    .fetch_one(pool)
    .await
}

/// Newest unused code matching `code` that is still unexpired at `now`
pub async fn find_valid_code(
    executor: impl SqliteExecutor<'_>,
    user_id: Uuid,
    code: &str,
    now: DateTime<Utc>,
) -> Result<Option<PasswordResetCode>, sqlx::Error> {
    sqlx::query_as::<_, PasswordResetCode>(
        r#"
        SELECT id, user_id, code, created_at, expires_at, used
        FROM password_reset_codes
        WHERE user_id = ? AND code = ? AND used = 0 AND expires_at > ?
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(code)
    .bind(now)
    .fetch_optional(executor)
    .await
}

/// Mark a code used if nobody has yet
///
/// # Returns
/// `true` when this call consumed the code
pub async fn mark_used(executor: impl SqliteExecutor<'_>, code_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE password_reset_codes SET used = 1 WHERE id = ? AND used = 0")
        .bind(code_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() == 1)
}
