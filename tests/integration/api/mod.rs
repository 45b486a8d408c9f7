//! API integration tests
//!
//! Integration tests for all API endpoints

mod auth_test;
mod newsletter_test;
mod notes_test;
mod password_reset_test;
mod payments_test;
