/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - SQLite connection pool
 * - JWT token issuer
 * - Outgoing mail transport
 * - Stripe client
 * - The configuration it was built from
 *
 * Every field is cheap to clone (pools and clients are reference counted),
 * and none holds mutable business state: throttles and codes live in the
 * database.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * # Example
 *
 * ```rust
 * use notes_backend::backend::server::state::AppState;
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     let _ = pool.size();
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::mail::Mailer;
use crate::backend::payments::stripe::StripeClient;
use crate::shared::AppConfig;

/// Application state shared by every handler
///
/// # Fields
///
/// * `db_pool` - SQLite connection pool
/// * `tokens` - Issues and verifies access/refresh tokens
/// * `mailer` - Sends reset codes
/// * `stripe` - Payment processor client
/// * `config` - Configuration the state was built from
#[derive(Clone, Debug)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub tokens: TokenIssuer,
    pub mailer: Mailer,
    pub stripe: StripeClient,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Assemble the state from its parts
    ///
    /// The token issuer is derived from `config`.
    pub fn new(config: Arc<AppConfig>, db_pool: SqlitePool, mailer: Mailer, stripe: StripeClient) -> Self {
        Self {
            tokens: TokenIssuer::from_config(&config),
            db_pool,
            mailer,
            stripe,
            config,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Mailer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mailer.clone()
    }
}

impl FromRef<AppState> for StripeClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.stripe.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
