//! Newsletter subscriber storage.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NewsletterSubscriber {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

pub async fn is_subscribed(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_subscribers WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Store a subscriber
///
/// Fails with a unique violation when the email is already stored.
pub async fn insert_subscriber(
    pool: &SqlitePool,
    email: &str,
    now: DateTime<Utc>,
) -> Result<NewsletterSubscriber, sqlx::Error> {
    sqlx::query_as::<_, NewsletterSubscriber>(
        r#"
        INSERT INTO newsletter_subscribers (email, created_at)
        VALUES (?, ?)
        RETURNING id, email, created_at
        "#,
    )
    .bind(email)
    .bind(now)
    .fetch_one(pool)
    .await
}
