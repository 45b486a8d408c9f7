//! Database and configuration fixtures
//!
//! Every fixture uses a private in-memory SQLite database with migrations
//! applied, so tests are isolated without cleanup.

use notes_backend::backend::server::config::load_database;
use notes_backend::shared::{AppConfig, StripeConfig};
use sqlx::SqlitePool;

pub const TEST_DATABASE_URL: &str = "sqlite::memory:";
pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const TEST_PUBLISHABLE_KEY: &str = "pk_test_notes";
pub const TEST_SECRET_KEY: &str = "sk_test_notes";

/// Configuration for tests: in-memory store, cheap hashing, no SMTP
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .database_url(TEST_DATABASE_URL)
        .jwt_secret(TEST_JWT_SECRET)
        .bcrypt_cost(4)
        .stripe(StripeConfig {
            secret_key: None,
            publishable_key: TEST_PUBLISHABLE_KEY.to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
        })
        .build()
        .expect("Test configuration should be valid")
}

/// [`test_config`] with a Stripe secret key and API base
pub fn test_config_with_stripe(api_base: &str) -> AppConfig {
    let mut config = test_config();
    config.stripe = StripeConfig {
        secret_key: Some(TEST_SECRET_KEY.to_string()),
        publishable_key: TEST_PUBLISHABLE_KEY.to_string(),
        api_base: api_base.to_string(),
    };
    config
}

/// Test database fixture
pub struct TestDatabase {
    pool: SqlitePool,
}

impl TestDatabase {
    /// Create a migrated in-memory database
    pub async fn new() -> Self {
        let pool = load_database(TEST_DATABASE_URL)
            .await
            .expect("Failed to create test database");
        Self { pool }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
