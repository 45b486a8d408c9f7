/**
 * Notes Handlers
 *
 * All routes here sit behind `auth_middleware`; every query is scoped to the
 * authenticated caller, so another user's note behaves as if it did not
 * exist.
 *
 * - `GET /api/notes/` - the caller's notes, newest first
 * - `POST /api/notes/` - create a note
 * - `DELETE /api/notes/delete/{id}/` - delete one of the caller's notes
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;

use super::db::{delete_note_for_author, insert_note, list_notes_for_author, Note, TITLE_MAX_LEN};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::validation::required;
use crate::shared::FieldErrors;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl CreateNoteRequest {
    /// Trimmed title and content, or the field errors
    fn validate(&self) -> Result<(&str, &str), FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = required(&mut errors, "title", self.title.as_deref()).map(str::trim);
        if let Some(title) = title {
            if title.chars().count() > TITLE_MAX_LEN {
                errors.add("title", format!("Ensure this field has no more than {TITLE_MAX_LEN} characters."));
            }
        }
        let content = required(&mut errors, "content", self.content.as_deref()).map(str::trim);

        match (errors.is_empty(), title, content) {
            (true, Some(title), Some(content)) => Ok((title, content)),
            _ => Err(errors),
        }
    }
}

pub async fn list_notes(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<Note>>, BackendError> {
    let notes = list_notes_for_author(&pool, auth.user_id).await?;
    tracing::debug!("Listed {} notes for {}", notes.len(), auth.username);
    Ok(Json(notes))
}

/// Create a note owned by the caller
///
/// # Example Request
///
/// ```http
/// POST /api/notes/ HTTP/1.1
/// Authorization: Bearer <access token>
/// Content-Type: application/json
///
/// { "title": "Groceries", "content": "Milk, eggs" }
/// ```
///
/// # Example Response (201)
///
/// ```json
/// {
///   "id": 7,
///   "title": "Groceries",
///   "content": "Milk, eggs",
///   "created_at": "2026-10-14T09:30:00Z",
///   "author": "123e4567-e89b-12d3-a456-426614174000"
/// }
/// ```
pub async fn create_note(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), BackendError> {
    let (title, content) = request.validate().map_err(|errors| {
        tracing::warn!("Invalid note from {}: {}", auth.username, errors);
        BackendError::validation(errors)
    })?;

    let note = insert_note(&pool, auth.user_id, title, content, Utc::now()).await?;
    tracing::info!("Note {} created by {}", note.id, auth.username);

    Ok((StatusCode::CREATED, Json(note)))
}

/// Delete one of the caller's notes
///
/// Ids that are not integers, do not exist or belong to someone else all
/// answer 404.
pub async fn delete_note(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, BackendError> {
    let note_id: i64 = id.parse().map_err(|_| BackendError::NotFound)?;

    if !delete_note_for_author(&pool, note_id, auth.user_id).await? {
        tracing::warn!("Note {} not found for {}", note_id, auth.username);
        return Err(BackendError::NotFound);
    }

    tracing::info!("Note {} deleted by {}", note_id, auth.username);
    Ok(StatusCode::NO_CONTENT)
}
