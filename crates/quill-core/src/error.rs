//! # Error Types
//!
//! Domain-specific error types for quill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quill-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── WordsError       - Amount-in-words conversion failures            │
//! │                                                                         │
//! │  quill-limit errors (separate crate)                                   │
//! │  └── LimitError       - Policy / counter-store failures                │
//! │                                                                         │
//! │  invoice-api errors (in app)                                           │
//! │  └── ApiError         - What gRPC callers see (tonic::Status)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value, bound)
//! 3. Errors are enum variants, never String
//! 4. Validation errors are never retried - they indicate a request defect

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These wrap the specific error families so orchestration code can carry a
/// single error type through the compute-then-render pipeline.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input validation failed before computation began.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Amount-in-words conversion failed.
    ///
    /// Totals computation has already succeeded when this occurs; callers
    /// decide whether a missing words string is fatal to the whole invoice.
    #[error("Words conversion error: {0}")]
    Words(#[from] WordsError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller-supplied data doesn't meet requirements. The
/// whole request is rejected before any computation - no partial totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Arithmetic on caller-supplied values left the representable range.
    ///
    /// The inputs are individually valid; their combination is not. The
    /// request is rejected rather than wrap or saturate a monetary amount.
    #[error("{field} exceeds the representable amount range")]
    Overflow { field: String },
}

// =============================================================================
// Words Error
// =============================================================================

/// Amount-in-words conversion errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordsError {
    /// The amount exceeds the documented conversion bound.
    ///
    /// The converter refuses rather than emit a wrong or truncated string.
    #[error("Amount of {major} major units exceeds the words bound of {max}")]
    AmountTooLarge { major: i64, max: i64 },

    /// Negative amounts have no words form on an invoice.
    #[error("Cannot render a negative amount ({minor} minor units) in words")]
    NegativeAmount { minor: i64 },
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
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        };
        assert_eq!(err.to_string(), "tax_rate must be between 0 and 10000");
    }

    #[test]
    fn test_words_error_message() {
        let err = WordsError::AmountTooLarge {
            major: 1_000_000_000_000,
            max: 999_999_999_999,
        };
        assert!(err.to_string().contains("999999999999"));
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let validation = ValidationError::Required {
            field: "description".to_string(),
        };
        let core: CoreError = validation.into();
        assert!(matches!(core, CoreError::Validation(_)));

        let words = WordsError::NegativeAmount { minor: -1 };
        let core: CoreError = words.into();
        assert!(matches!(core, CoreError::Words(_)));
    }
}
