//! Shared Error Types
//!
//! This module defines error types that are shared across backend components.
//!
//! # Error Categories
//!
//! - `ValidationError` - A single field failed validation
//! - `InvalidFields` - Several fields failed validation at once
//!
//! Field-level failures are collected in [`FieldErrors`], which serializes
//! as a `{"field": ["message", ...]}` map, the shape API clients receive in
//! 400 responses.
//!
//! # Usage
//!
//! ```rust
//! use notes_backend::shared::error::{FieldErrors, SharedError};
//!
//! let mut errors = FieldErrors::new();
//! errors.add("email", "This field is required.");
//! let error: SharedError = errors.into();
//! assert!(error.to_string().contains("email"));
//! ```
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Message used when a required field is absent from the request body.
pub const REQUIRED: &str = "This field is required.";

/// Message used when a required field is present but empty.
pub const BLANK: &str = "This field may not be blank.";

/// Validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Shared error types that can occur in any backend component
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Several fields failed validation
    #[error("Validation failed: {0}")]
    InvalidFields(FieldErrors),
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The field errors to send back to the client
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            Self::ValidationError { field, message } => {
                let mut errors = FieldErrors::new();
                errors.add(field.clone(), message.clone());
                errors
            }
            Self::InvalidFields(errors) => errors.clone(),
        }
    }
}

impl From<FieldErrors> for SharedError {
    fn from(errors: FieldErrors) -> Self {
        Self::InvalidFields(errors)
    }
}
