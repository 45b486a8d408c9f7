//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation and layers
//! ├── api_routes.rs   - Public and protected API routes
//! └── root.rs         - API root handler
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use notes_backend::backend::routes::create_router;
//! use notes_backend::backend::server::build_state;
//! use notes_backend::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app_state = build_state(AppConfig::default()).await?;
//! let router = create_router(app_state);
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

/// API root
pub mod root;

pub use router::create_router;
