//! Payment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Longest accepted plan name
pub const PLAN_TYPE_MAX_LEN: usize = 20;

/// Payment lifecycle: created `pending`, moved to `completed` by an explicit
/// confirmation. `failed` is representable but never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    pub user_id: Uuid,
    pub amount_cents: i64,
    pub payment_intent_id: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub plan_type: String,
}

pub async fn insert_payment(
    pool: &SqlitePool,
    user_id: Uuid,
    amount_cents: i64,
    payment_intent_id: &str,
    plan_type: &str,
    now: DateTime<Utc>,
) -> Result<Payment, sqlx::Error> {
    sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments (user_id, amount_cents, payment_intent_id, status, created_at, plan_type)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, amount_cents, payment_intent_id, status, created_at, plan_type
        "#,
    )
    .bind(user_id)
    .bind(amount_cents)
    .bind(payment_intent_id)
    .bind(PaymentStatus::Pending)
    .bind(now)
    .bind(plan_type)
    .fetch_one(pool)
    .await
}

pub async fn get_payment_for_user(
    pool: &SqlitePool,
    payment_id: i64,
    user_id: Uuid,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(
        r#"
        SELECT id, user_id, amount_cents, payment_intent_id, status, created_at, plan_type
        FROM payments
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(payment_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Mark the user's payment completed
///
/// Confirming an already completed payment succeeds again.
///
/// # Returns
/// `false` when the payment does not exist or belongs to someone else
pub async fn complete_payment_for_user(
    pool: &SqlitePool,
    payment_id: i64,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE payments SET status = ? WHERE id = ? AND user_id = ?")
        .bind(PaymentStatus::Completed)
        .bind(payment_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
