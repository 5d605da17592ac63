//! # Error Types
//!
//! Domain-specific error types for biblio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  biblio-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Form / input validation failures               │
//! │                                                                         │
//! │  biblio-client errors (separate crate)                                 │
//! │  └── ClientError      - Remote API request failures                    │
//! │                                                                         │
//! │  admin-web errors (in app)                                             │
//! │  └── WebError         - What the browser sees (HTML + status)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → WebError → Browser                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list view itself has no error type: degenerate inputs are clamped
//! or defaulted, never reported.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A role selector value that is neither `admin` nor `regular`.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// A rent status filter that is not `all`, `pending` or `returned`.
    #[error("Unknown rent status filter: {0}")]
    UnknownRentStatus(String),

    /// Page size outside `1..=max`.
    #[error("Page size {size} must be between 1 and {max}")]
    InvalidPageSize { size: usize, max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by book form normalization before anything is sent to the API.
/// The `Display` text is shown verbatim above the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// One or more numeric fields are zero or negative.
    #[error("All number fields must be greater than 0")]
    NumbersMustBePositive,

    /// A numeric field is negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., letters in a number field).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// New books must start with every copy available.
    #[error("Amount Total and Amount Available must be the same")]
    AmountsMustMatch,

    /// More copies available than exist.
    #[error("Amount Available cannot exceed Amount Total")]
    AvailableExceedsTotal,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidPageSize { size: 0, max: 500 };
        assert_eq!(err.to_string(), "Page size 0 must be between 1 and 500");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        assert_eq!(
            ValidationError::NumbersMustBePositive.to_string(),
            "All number fields must be greater than 0"
        );
        assert_eq!(
            ValidationError::AmountsMustMatch.to_string(),
            "Amount Total and Amount Available must be the same"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "author".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
