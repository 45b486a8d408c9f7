//! Notes Backend - Main Library
//!
//! A small multi-tenant web backend built on Axum and SQLite: user accounts
//! with JWT access/refresh tokens, a per-user notes resource, password reset
//! by emailed one-time code, a newsletter signup and a Stripe payment flow.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that carry no server dependencies
//!   - Application configuration (`AppConfig`)
//!   - Field-level validation errors and input validators
//!
//! - **`backend`** - The HTTP server
//!   - Router, application state and middleware
//!   - Auth, notes, password reset, newsletter and payments components
//!   - Mail delivery and store-backed throttling
//!
//! # Usage
//!
//! ```rust,no_run
//! use notes_backend::backend::server::init::create_app;
//! use notes_backend::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
