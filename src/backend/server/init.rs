/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Validate the configuration
 * 2. Connect to the database and apply migrations
 * 3. Build the mailer (SMTP, or log-only without SMTP settings)
 * 4. Build the Stripe client
 * 5. Create and configure the router
 *
 * Unlike optional services elsewhere, a database failure stops startup:
 * every route needs the store.
 */

use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::backend::mail::{MailError, Mailer};
use crate::backend::payments::stripe::StripeClient;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, DatabaseInitError};
use crate::backend::server::state::AppState;
use crate::shared::{AppConfig, ConfigError};

/// Reasons the server cannot start
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("database initialization failed: {0}")]
    Database(#[from] DatabaseInitError),
    #[error("mailer setup failed: {0}")]
    Mail(#[from] MailError),
    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Build the application state from configuration
///
/// # Arguments
///
/// * `config` - Validated application configuration
///
/// # Returns
///
/// State with a migrated pool, the configured mailer and Stripe client
pub async fn build_state(config: AppConfig) -> Result<AppState, InitError> {
    config.validate()?;

    if config.uses_dev_secret() {
        tracing::warn!("Using the development JWT secret; set JWT_SECRET in production");
    }

    let db_pool = load_database(&config.database_url).await?;
    let mailer = Mailer::from_config(&config)?;
    let stripe = StripeClient::new(&config.stripe)?;

    if config.stripe.secret_key.is_none() {
        tracing::warn!("STRIPE_SECRET_KEY not set; payment intent creation will fail");
    }

    Ok(AppState::new(Arc::new(config), db_pool, mailer, stripe))
}

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: AppConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing notes backend server");

    let app_state = build_state(config).await?;
    let app = create_router(app_state);

    tracing::info!("Router configured");

    Ok(app)
}
