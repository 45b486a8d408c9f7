//! Password Reset Module
//!
//! Emailed six-digit codes that let a user set a new password.
//!
//! - **`codes`** - Code records and their queries
//! - **`throttle`** - Per-account cooldown between reset requests
//! - **`email`** - The reset email body
//! - **`service`** - Request and verification logic
//! - **`handlers`** - HTTP handlers

pub mod codes;
pub mod email;
pub mod handlers;
pub mod service;
pub mod throttle;

pub use handlers::{request_reset_handler, verify_reset_handler};
pub use service::{request_reset, verify_reset, ResetError, ResetRequestOutcome};
