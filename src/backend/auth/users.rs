/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, up to 150 chars)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Inactive users cannot log in or use their tokens
    pub is_active: bool,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `email` - User email
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error (a UNIQUE violation when the username or email is taken)
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, email, password_hash, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, 1, ?, ?)
        RETURNING id, username, email, password_hash, is_active, created_at, updated_at
        "#
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, is_active, created_at, updated_at
        FROM users
        WHERE email = ?
        "#
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by username
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, is_active, created_at, updated_at
        FROM users
        WHERE username = ?
        "#
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, is_active, created_at, updated_at
        FROM users
        WHERE id = ?
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find the user a login identifier refers to
///
/// The identifier is tried as a username first, then as an email.
pub async fn find_user_by_login(
    pool: &SqlitePool,
    login: &str,
) -> Result<Option<User>, sqlx::Error> {
    if let Some(user) = get_user_by_username(pool, login).await? {
        return Ok(Some(user));
    }
    get_user_by_email(pool, login).await
}

/// Replace a user's password hash
///
/// Takes any executor so the update can join a transaction.
pub async fn update_password_hash(
    executor: impl SqliteExecutor<'_>,
    user_id: Uuid,
    password_hash: &str,
    now: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET password_hash = ?, updated_at = ?
        WHERE id = ?
        "#
    )
    .bind(password_hash)
    .bind(now)
    .bind(user_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Enable or disable an account
pub async fn set_user_active(
    pool: &SqlitePool,
    user_id: Uuid,
    is_active: bool,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET is_active = ?, updated_at = ? WHERE id = ?")
        .bind(is_active)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete a user; notes, codes, tokens and payments cascade
pub async fn delete_user(pool: &SqlitePool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
