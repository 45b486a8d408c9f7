//! Database migration tests
//!
//! Tests to ensure migrations run correctly and database schema is valid

use chrono::Utc;

use crate::common::TestDatabase;
use notes_backend::backend::auth::remember_me::upsert_token;
use notes_backend::backend::auth::users::{create_user, delete_user};
use notes_backend::backend::notes::db::insert_note;
use notes_backend::backend::password_reset::codes::insert_code;
use notes_backend::backend::payments::db::insert_payment;

#[tokio::test]
async fn test_tables_exist() {
    let db = TestDatabase::new().await;

    for table in [
        "users",
        "notes",
        "remember_me_tokens",
        "password_reset_codes",
        "payments",
        "newsletter_subscribers",
        "throttle_hits",
    ] {
        let result = sqlx::query(&format!("SELECT 1 FROM {table} LIMIT 1"))
            .execute(db.pool())
            .await;
        assert!(result.is_ok(), "{table} table should exist");
    }
}

#[tokio::test]
async fn test_deleting_user_cascades() {
    let db = TestDatabase::new().await;
    let pool = db.pool();
    let now = Utc::now();

    let user = create_user(pool, "alice", "alice@example.com", "hash").await.unwrap();
    insert_note(pool, user.id, "title", "content", now).await.unwrap();
    insert_code(pool, user.id, "123456", now).await.unwrap();
    upsert_token(pool, user.id, "refresh-token", now).await.unwrap();
    insert_payment(pool, user.id, 500, "pi_1", "single", now).await.unwrap();

    assert_eq!(delete_user(pool, user.id).await.unwrap(), 1);

    for table in ["notes", "password_reset_codes", "remember_me_tokens", "payments"] {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap();
        assert_eq!(count, 0, "{table} rows should be deleted with the user");
    }
}

#[tokio::test]
async fn test_payment_amount_must_be_positive() {
    let db = TestDatabase::new().await;
    let user = create_user(db.pool(), "bob", "bob@example.com", "hash").await.unwrap();

    let result = insert_payment(db.pool(), user.id, 0, "pi_0", "single", Utc::now()).await;
    assert!(result.is_err());
}
