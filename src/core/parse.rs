use std::str::FromStr;

use uuid::Uuid;

use crate::core::{AppError, Result};

/// Parse a caller-supplied identifier
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::validation(format!("Invalid {} id: '{}'", what, raw)))
}

/// Parse an identifier read back from the store
pub fn stored_id(raw: &str, column: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::Internal(format!("Invalid {} in database: {}", column, e)))
}

/// Parse an enum-valued column read back from the store
pub fn stored_value<T>(raw: &str, column: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    raw.parse()
        .map_err(|e| AppError::Internal(format!("Invalid {} in database: {}", column, e)))
}

/// Render `prefix` followed by `sequence` zero-padded to `width` digits
pub fn sequence_code(prefix: &str, sequence: i64, width: usize) -> String {
    format!("{}{:0width$}", prefix, sequence, width = width)
}

/// Trimmed, non-empty required text field
pub fn required_text(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Optional text field; blank collapses to `None`
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Phone numbers: digits with an optional leading `+`, 7 to 15 digits
pub fn validate_phone(value: &str) -> Result<String> {
    let phone = required_text(value, "phone")?;
    let digits = phone.strip_prefix('+').unwrap_or(&phone);
    if !(7..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(format!("Invalid phone number: '{}'", phone)));
    }
    Ok(phone)
}
