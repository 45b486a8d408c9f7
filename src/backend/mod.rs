//! Backend Module
//!
//! This module contains all server-side code for the notes backend: an Axum
//! HTTP server over a SQLite store, plus the payment processor and mail
//! relay integrations.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, database setup
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, JWT tokens, remember-me records, user queries
//! - **`notes`** - Per-user notes resource
//! - **`password_reset`** - Emailed one-time codes with attempt throttling
//! - **`newsletter`** - Subscriber signup
//! - **`payments`** - Stripe payment intents and confirmation
//! - **`throttle`** - Store-backed request rate limiting
//! - **`mail`** - Outgoing email delivery
//! - **`middleware`** - Request processing middleware (auth, CORS)
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs            - Module exports and documentation
//! ├── server/           - Server initialization and state
//! ├── routes/           - Route configuration
//! ├── auth/             - Authentication
//! ├── notes/            - Notes CRUD
//! ├── password_reset/   - Reset codes and throttle
//! ├── newsletter/       - Newsletter signup
//! ├── payments/         - Payment processor flow
//! ├── throttle/         - Rate limiting
//! ├── mail/             - Email delivery
//! ├── middleware/       - Request middleware
//! └── error/            - Error types
//! ```
//!
//! # State Management
//!
//! Handlers share an `AppState` holding the connection pool, the token
//! issuer, the mailer, the Stripe client and the configuration. No business
//! rule keeps in-process mutable state: throttles are decided from
//! timestamps stored in the database.
//!
//! # Error Handling
//!
//! Every handler returns `Result<_, BackendError>`. The error converts into a
//! JSON response with the matching HTTP status; store failures never leak
//! SQL text to the client.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Notes resource
pub mod notes;

/// Password reset by emailed code
pub mod password_reset;

/// Newsletter subscription
pub mod newsletter;

/// Payment intents
pub mod payments;

/// Store-backed rate limiting
pub mod throttle;

/// Outgoing email
pub mod mail;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::create_app;
pub use server::state::AppState;
