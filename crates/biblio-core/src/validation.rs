//! # Validation Module
//!
//! Input validation utilities for Biblio Admin.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser                                                      │
//! │  └── `required` / `type="number"` attributes on the form inputs        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: admin-web handler (Rust)                                     │
//! │  ├── Form decoding (axum Form extractor)                               │
//! │  └── THIS MODULE: field rules used by BookForm normalization           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote library API                                           │
//! │  └── Whatever the backend enforces (out of our hands)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use biblio_core::validation::{parse_count, validate_record_id};
//!
//! assert_eq!(parse_count("pages", " 320 ").unwrap(), 320);
//! assert!(validate_record_id("65f1c0ffee0000000000abcd").is_ok());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::MAX_PAGE_SIZE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest free-text value accepted from the book form.
pub const MAX_TEXT_LEN: usize = 200;

/// Longest synopsis accepted from the book form.
pub const MAX_SYNOPSIS_LEN: usize = 5000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most `max` characters
///
/// ## Example
/// ```rust
/// use biblio_core::validation::validate_required_text;
///
/// assert_eq!(validate_required_text("name", "  Rayuela ", 200).unwrap(), "Rayuela");
/// assert!(validate_required_text("name", "   ", 200).is_err());
/// ```
pub fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a record identifier before it is placed in an API path.
///
/// ## Rules
/// - Must not be blank
/// - Must not contain `/`, `?`, `#` or whitespace
/// - Must not be `.` or `..` (URL normalization drops those segments)
///
/// The remote API assigns Mongo-style ObjectIds, but rents use their own
/// `rent_id` scheme, so only path safety is checked here.
pub fn validate_record_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id
        .chars()
        .any(|c| c == '/' || c == '?' || c == '#' || c.is_whitespace())
    {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must not contain '/', '?', '#' or whitespace".to_string(),
        });
    }

    if id == "." || id == ".." {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must not be a relative path segment".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses an integer count (pages, copies) from a form field.
///
/// ## Rules
/// - Blank is treated as missing
/// - Must parse as a whole number
///
/// The sign is not checked here; create and update apply different rules.
pub fn parse_count(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    raw.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a whole number".to_string(),
    })
}

/// Validates a configured page size.
///
/// ## Rules
/// - Must be between 1 and MAX_PAGE_SIZE (500)
pub fn validate_page_size(size: usize) -> CoreResult<()> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(CoreError::InvalidPageSize {
            size,
            max: MAX_PAGE_SIZE,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_text() {
        assert_eq!(
            validate_required_text("author", "Julio Cortázar", MAX_TEXT_LEN).unwrap(),
            "Julio Cortázar"
        );
        assert!(validate_required_text("author", "", MAX_TEXT_LEN).is_err());
        assert!(validate_required_text("author", "  \t", MAX_TEXT_LEN).is_err());
        assert!(matches!(
            validate_required_text("author", &"a".repeat(201), MAX_TEXT_LEN),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id("65f1c0ffee0000000000abcd").is_ok());
        assert!(validate_record_id("R-17").is_ok());

        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("../admin").is_err());
        assert!(validate_record_id("abc?x=1").is_err());
        assert!(validate_record_id("a b").is_err());
        assert!(validate_record_id(".").is_err());
        assert!(validate_record_id("..").is_err());
        assert!(validate_record_id("...").is_ok());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("pages", "12").unwrap(), 12);
        assert_eq!(parse_count("pages", " -3 ").unwrap(), -3);

        assert!(matches!(
            parse_count("pages", ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_count("pages", "doce"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_count("pages", "1.5").is_err());
    }

    #[test]
    fn test_validate_page_size() {
        assert!(validate_page_size(1).is_ok());
        assert!(validate_page_size(20).is_ok());
        assert!(validate_page_size(500).is_ok());
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(501).is_err());
    }
}
