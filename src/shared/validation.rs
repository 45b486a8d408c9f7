//! Input validators shared by registration and the newsletter signup.

use super::error::{FieldErrors, BLANK, REQUIRED};

/// Longest username accepted at registration
pub const USERNAME_MAX_LEN: usize = 150;

/// Longest email address accepted anywhere
pub const EMAIL_MAX_LEN: usize = 254;

/// Validate username format
///
/// Usernames must be:
/// - 1-150 characters long
/// - Letters, digits and `@ . + - _` only
pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    if len == 0 || len > USERNAME_MAX_LEN {
        return false;
    }

    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

/// Validate email format
///
/// A pragmatic check: one `@`, a non-empty local part of at most 64
/// characters, and a dotted domain whose labels are non-empty and made of
/// letters, digits and hyphens.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > EMAIL_MAX_LEN || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

/// Check that a field is present and not blank
///
/// Records a field error and returns `None` otherwise. The returned value is
/// not trimmed.
pub fn required<'a>(errors: &mut FieldErrors, field: &str, value: Option<&'a str>) -> Option<&'a str> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(v) if v.trim().is_empty() => {
            errors.add(field, BLANK);
            None
        }
        Some(v) => Some(v),
    }
}
