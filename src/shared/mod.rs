//! Shared Module
//!
//! Types that the backend components share and that carry no dependency on
//! the HTTP server or the database: configuration, validation errors and
//! input validators.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Input validators
pub mod validation;

/// Re-export commonly used types for convenience
pub use error::{FieldErrors, SharedError};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, SmtpConfig, StripeConfig};
