/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * These types are shared across the register, token, refresh and current-user handlers.
 *
 * Request fields are optional so that a missing field is reported as a
 * field error instead of a body rejection.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::backend::auth::users::User;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct RegisterRequest {
    /// Up to 150 letters, digits or `@ . + - _`
    pub username: Option<String>,
    pub email: Option<String>,
    /// Will be hashed before storage
    pub password: Option<String>,
    /// When present, must equal `password`
    pub confirm_password: Option<String>,
}

/// Token request
///
/// `login` is a username or an email address.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub login: Option<String>,
    pub password: Option<String>,
    /// Any truthy JSON value requests a remembered session
    pub remember_me: Value,
}

impl LoginRequest {
    pub fn wants_remember_me(&self) -> bool {
        is_truthy(&self.remember_me)
    }
}

/// Token response
///
/// The expiry hints are only present for remember-me logins.
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_expires: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_expires: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RefreshResponse {
    pub access: String,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
        }
    }
}

/// Truthiness of a loosely typed JSON flag
///
/// `null`, `false`, `0`, `""`, `"false"`, `"0"` and empty containers are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
