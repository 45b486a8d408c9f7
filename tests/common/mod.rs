//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Database and configuration fixtures
//! - A test server over the real router
//! - Authentication test helpers
//! - Stripe API mocks

pub mod auth_helpers;
pub mod database;
pub mod stripe_mock;

use std::sync::Arc;

use axum_test::TestServer;
use notes_backend::backend::mail::{Mailer, OutgoingEmail};
use notes_backend::backend::payments::StripeClient;
use notes_backend::backend::routes::create_router;
use notes_backend::backend::server::config::load_database;
use notes_backend::backend::AppState;
use notes_backend::shared::AppConfig;
use sqlx::SqlitePool;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use database::*;
pub use stripe_mock::*;

pub const TEST_FROM_EMAIL: &str = "noreply@notes.test";

/// The full application over an in-memory database
///
/// Outgoing mail is captured in an outbox instead of being sent.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Application whose Stripe client talks to `api_base`
    pub async fn with_stripe(api_base: &str) -> Self {
        Self::with_config(test_config_with_stripe(api_base)).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let pool = load_database(&config.database_url)
            .await
            .expect("Failed to open test database");
        let stripe = StripeClient::new(&config.stripe).expect("Failed to build Stripe client");
        let state = AppState::new(Arc::new(config), pool, Mailer::outbox(TEST_FROM_EMAIL), stripe);
        let server = TestServer::new(create_router(state.clone())).expect("Failed to start test server");

        Self { server, state }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.state.db_pool
    }

    /// Emails sent so far, oldest first
    pub fn sent_emails(&self) -> Vec<OutgoingEmail> {
        self.state.mailer.sent()
    }
}
