//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database connection and migrations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `AppConfig` is validated
//! 2. **Database**: the pool is opened and migrations applied
//! 3. **Services**: mailer and Stripe client are built
//! 4. **Router Creation**: all routes and middleware are configured
//!
//! # Example
//!
//! ```rust,no_run
//! use notes_backend::backend::server::create_app;
//! use notes_backend::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database connection and migrations
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{build_state, create_app, InitError};
pub use state::AppState;
