//! bcrypt helpers shared by registration, login and password reset.

use axum::http::StatusCode;
use crate::backend::error::{BackendError, INTERNAL_ERROR};

/// Hash a password with the configured bcrypt cost
pub fn hash_password(password: &str, cost: u32) -> Result<String, BackendError> {
    bcrypt::hash(password, cost).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    })
}

/// Check a password against a stored hash
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match bcrypt::verify(password, password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::error!("Password verification error: {:?}", e);
            false
        }
    }
}
