//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Service names copied onto earnings and invoice lines
pub const MAX_NAME_LEN: usize = 200;

/// Notes, reasons (advance reason, invoice notes)
pub const MAX_NOTE_LEN: usize = 500;

/// Payment method labels: cash, card, transfer, etc.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a money amount in minor units is strictly positive.
pub fn validate_positive_amount(value: i64, field: &str) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

/// Validate a money amount in minor units is not negative.
pub fn validate_non_negative_amount(value: i64, field: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Rent", "reason", MAX_NOTE_LEN).is_ok());
        assert!(validate_required_text("   ", "reason", MAX_NOTE_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(501), "reason", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_amounts() {
        assert!(validate_positive_amount(1, "amount").is_ok());
        assert!(validate_positive_amount(0, "amount").is_err());
        assert!(validate_non_negative_amount(0, "advance_limit").is_ok());
        assert!(validate_non_negative_amount(-5, "advance_limit").is_err());
    }
}
