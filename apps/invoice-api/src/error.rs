//! Error types for the Invoice API.
//!
//! One enum per concern upstream (core validation, words, limiter,
//! rendering); this module folds them into the single `ApiError` that maps
//! onto `tonic::Status` at the wire. Callers get a structured reason, never
//! internal store details.

use tonic::Status;

use quill_core::{ValidationError, WordsError};
use quill_limit::LimitError;

use crate::renderer::RenderError;

/// Invoice API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller-supplied data failed validation. Never retried.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The grand total exceeds the words conversion bound.
    #[error("Words conversion failed: {0}")]
    Words(#[from] WordsError),

    /// Rate limiter configuration or store failure.
    #[error("Rate limiter error: {0}")]
    Limit(#[from] LimitError),

    /// Quota exhausted. Carries `reset_at` so callers can back off.
    #[error("Rate limit exceeded; retry after {reset_at}")]
    QuotaExceeded { reset_at: u64 },

    /// External template or PDF renderer failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl From<ApiError> for Status {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Validation(e) => Status::invalid_argument(e.to_string()),
            ApiError::Words(e) => Status::out_of_range(e.to_string()),
            ApiError::Limit(LimitError::StoreUnavailable(_)) => {
                // No store internals leak to the caller
                Status::unavailable("Rate limit store unavailable")
            }
            ApiError::Limit(e) => Status::failed_precondition(e.to_string()),
            ApiError::QuotaExceeded { reset_at } => Status::resource_exhausted(format!(
                "Rate limit exceeded; window resets at {reset_at}"
            )),
            ApiError::Render(_) => Status::internal("Invoice rendering failed"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_invalid_argument() {
        let err = ApiError::Validation(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
        let status: Status = err.into();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().contains("quantity"));
    }

    #[test]
    fn test_quota_maps_to_resource_exhausted_with_reset() {
        let status: Status = ApiError::QuotaExceeded { reset_at: 1_020 }.into();
        assert_eq!(status.code(), tonic::Code::ResourceExhausted);
        assert!(status.message().contains("1020"));
    }

    #[test]
    fn test_store_details_do_not_leak() {
        let err = ApiError::Limit(LimitError::StoreUnavailable(
            "ECONNREFUSED 10.0.0.5:6379".to_string(),
        ));
        let status: Status = err.into();
        assert_eq!(status.code(), tonic::Code::Unavailable);
        assert!(!status.message().contains("10.0.0.5"));
    }

    #[test]
    fn test_unknown_tier_maps_to_failed_precondition() {
        let status: Status = ApiError::Limit(LimitError::UnknownTier("gold".to_string())).into();
        assert_eq!(status.code(), tonic::Code::FailedPrecondition);
    }
}
