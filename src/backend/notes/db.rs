//! Note storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Longest accepted note title
pub const TITLE_MAX_LEN: usize = 100;

/// A note as stored and as returned by the API
///
/// `author` is the owning user's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "author_id")]
    pub author: Uuid,
}

/// All notes written by `author_id`, newest first
pub async fn list_notes_for_author(pool: &SqlitePool, author_id: Uuid) -> Result<Vec<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        r#"
        SELECT id, title, content, created_at, author_id
        FROM notes
        WHERE author_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_note(
    pool: &SqlitePool,
    author_id: Uuid,
    title: &str,
    content: &str,
    now: DateTime<Utc>,
) -> Result<Note, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        r#"
        INSERT INTO notes (title, content, created_at, author_id)
        VALUES (?, ?, ?, ?)
        RETURNING id, title, content, created_at, author_id
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(now)
    .bind(author_id)
    .fetch_one(pool)
    .await
}

/// Delete a note if `author_id` owns it
///
/// # Returns
/// `false` when no such note exists for this author
pub async fn delete_note_for_author(pool: &SqlitePool, note_id: i64, author_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notes WHERE id = ? AND author_id = ?")
        .bind(note_id)
        .bind(author_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
