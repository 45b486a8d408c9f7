/**
 * Password Reset Service
 *
 * The two halves of the flow, independent of HTTP:
 *
 * - [`request_reset`] issues and emails a code, subject to the cooldown in
 *   [`super::throttle`]. Unknown emails succeed silently so callers cannot
 *   probe for accounts.
 * - [`verify_reset`] consumes a code and rotates the password in one
 *   transaction. The code is consumed with a conditional update, so two
 *   concurrent verifications cannot both succeed.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;

use super::codes::{delete_stale_codes, find_valid_code, generate_code, insert_code, mark_used, recent_code_times};
use super::email::reset_code_email;
use super::throttle::{cooldown_remaining, window_start, Cooldown};
use crate::backend::auth::users::{get_user_by_email, update_password_hash};
use crate::backend::mail::{MailError, Mailer};

/// Result of a reset request that was not rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetRequestOutcome {
    /// A code was stored and emailed
    CodeSent,
    /// No account uses the email
    NoAccount,
}

#[derive(Debug, Error)]
pub enum ResetError {
    #[error("reset requested during cooldown, {} s left", .0.wait_seconds)]
    Throttled(Cooldown),
    #[error("reset code is invalid, used or expired")]
    InvalidCode,
    #[error("failed to send reset email: {0}")]
    Mail(#[from] MailError),
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Issue a reset code for the account using `email`
///
/// # Process
/// 1. Look up the user; unknown emails return `NoAccount`
/// 2. Reject with `Throttled` when inside the cooldown
/// 3. Delete the user's unused codes older than the window
/// 4. Store a new code and email it
pub async fn request_reset(
    pool: &SqlitePool,
    mailer: &Mailer,
    email: &str,
    now: DateTime<Utc>,
) -> Result<ResetRequestOutcome, ResetError> {
    let Some(user) = get_user_by_email(pool, email).await? else {
        tracing::info!("Password reset requested for unknown email");
        return Ok(ResetRequestOutcome::NoAccount);
    };

    let since = window_start(now);
    let recent = recent_code_times(pool, user.id, since).await?;

    if let Some(cooldown) = cooldown_remaining(&recent, now) {
        tracing::warn!(
            "Password reset for {} throttled: attempt {}, wait {} s",
            user.username,
            cooldown.attempt_count,
            cooldown.wait_seconds
        );
        return Err(ResetError::Throttled(cooldown));
    }

    let pruned = delete_stale_codes(pool, user.id, since).await?;
    if pruned > 0 {
        tracing::debug!("Deleted {} stale reset codes for {}", pruned, user.username);
    }

    let code = generate_code();
    insert_code(pool, user.id, &code, now).await?;

    mailer.send(reset_code_email(&user.email, &user.username, &code)).await?;
    tracing::info!("Password reset code sent successfully to {}", user.email);

    Ok(ResetRequestOutcome::CodeSent)
}

/// Consume a reset code and set a new password
///
/// # Arguments
/// * `email` - Account email
/// * `code` - The emailed code
/// * `new_password` - Plain-text new password
/// * `bcrypt_cost` - Hashing cost
/// * `now` - Verification time; the code must expire after it
pub async fn verify_reset(
    pool: &SqlitePool,
    email: &str,
    code: &str,
    new_password: &str,
    bcrypt_cost: u32,
    now: DateTime<Utc>,
) -> Result<(), ResetError> {
    let user = get_user_by_email(pool, email).await?.ok_or(ResetError::InvalidCode)?;

    // Unknown codes are rejected before any hashing
    if find_valid_code(pool, user.id, code, now).await?.is_none() {
        tracing::warn!("Invalid or expired reset code attempt for email: {}", email);
        return Err(ResetError::InvalidCode);
    }

    let password_hash = bcrypt::hash(new_password, bcrypt_cost)?;

    let mut tx = pool.begin().await?;

    let reset_code = find_valid_code(&mut *tx, user.id, code, now)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Reset code consumed during verification for email: {}", email);
            ResetError::InvalidCode
        })?;

    if !mark_used(&mut *tx, reset_code.id).await? {
        tracing::warn!("Reset code already consumed for email: {}", email);
        return Err(ResetError::InvalidCode);
    }

    update_password_hash(&mut *tx, user.id, &password_hash, now).await?;

    tx.commit().await?;

    tracing::info!("Password successfully reset for user {}", user.username);
    Ok(())
}
