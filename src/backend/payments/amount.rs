//! Exact dollar amounts.
//!
//! Amounts arrive as JSON numbers or strings (`149.99`, `"149.99"`) and are
//! kept as integer cents, the unit the payment processor expects. Parsing
//! works on the decimal text, so no value ever passes through a float.

use serde_json::Value;
use thiserror::Error;

/// Largest storable amount: 10 digits with 2 decimal places
pub const MAX_AMOUNT_CENTS: i64 = 9_999_999_999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is required.")]
    Missing,
    #[error("A valid number is required for amount.")]
    NotANumber,
    #[error("Ensure that there are no more than 2 decimal places in amount.")]
    TooPrecise,
    #[error("amount must be greater than zero.")]
    NotPositive,
    #[error("Ensure that there are no more than 10 digits in total in amount.")]
    TooLarge,
}

/// Parse a request amount into cents
pub fn parse_amount_cents(value: Option<&Value>) -> Result<i64, AmountError> {
    match value {
        None | Some(Value::Null) => Err(AmountError::Missing),
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        Some(_) => Err(AmountError::NotANumber),
    }
}

fn parse_decimal(text: &str) -> Result<i64, AmountError> {
    if text.starts_with('-') {
        return Err(AmountError::NotPositive);
    }
    let text = text.strip_prefix('+').unwrap_or(text);

    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(AmountError::NotANumber);
    }
    if fraction.len() > 2 {
        return Err(AmountError::TooPrecise);
    }

    let whole = whole.trim_start_matches('0');
    if whole.len() > 8 {
        return Err(AmountError::TooLarge);
    }

    let dollars: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| AmountError::NotANumber)? };
    let cents: i64 = format!("{fraction:0<2}").parse().map_err(|_| AmountError::NotANumber)?;
    let total = dollars * 100 + cents;

    if total <= 0 {
        return Err(AmountError::NotPositive);
    }
    if total > MAX_AMOUNT_CENTS {
        return Err(AmountError::TooLarge);
    }
    Ok(total)
}

/// Render cents as a dollar string with two decimals
pub fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
