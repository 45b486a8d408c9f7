//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//! Handlers are organized into focused submodules for maintainability.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Request and response types
//! ├── register.rs   - User registration handler
//! ├── login.rs      - Token pair handler
//! ├── refresh.rs    - Access token refresh handler
//! └── me.rs         - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/user/register/ - User registration
//! - **`login`** - POST /api/token/ - Access/refresh pair by username or email
//! - **`refresh`** - POST /api/token/refresh/ - New access token
//! - **`get_me`** - GET /api/user/current/ - Get current user info
//!
//! # Example
//!
//! ```rust,no_run
//! use notes_backend::backend::auth::handlers::{register, login, refresh};
//! use notes_backend::backend::AppState;
//! use axum::{routing::post, Router};
//!
//! # fn example() -> Router<AppState> {
//! Router::new()
//!     .route("/api/user/register/", post(register))
//!     .route("/api/token/", post(login))
//!     .route("/api/token/refresh/", post(refresh))
//! # }
//! ```

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Refresh handler
pub mod refresh;

/// Get current user handler
pub mod me;

// Re-export commonly used types
pub use types::{LoginRequest, RefreshRequest, RegisterRequest, TokenResponse, UserResponse};

// Re-export handlers
pub use register::register;
pub use login::login;
pub use refresh::refresh;
pub use me::get_me;
