//! Error types for quill-limit.
//!
//! ## Design Principles
//! 1. Quota rejection is NOT an error - it is a normal [`Decision`] with
//!    `allowed = false` (see `limiter`)
//! 2. An unknown tier is a deployment defect, never a silent default
//! 3. Store failures carry enough context to log, but no store internals
//!    leak to callers
//!
//! [`Decision`]: crate::limiter::Decision

use thiserror::Error;

/// Rate limiter errors.
#[derive(Debug, Error)]
pub enum LimitError {
    /// No policy is configured for the requested tier.
    ///
    /// Configuration error: the tier table is loaded at startup and a miss
    /// here means the deployment is wrong, not the request.
    #[error("No rate limit policy configured for tier '{0}'")]
    UnknownTier(String),

    /// The policy table itself is malformed.
    #[error("Invalid rate limit policy for tier '{tier}': {reason}")]
    InvalidPolicy { tier: String, reason: String },

    /// The counter store is unreachable or timed out.
    ///
    /// Handled inside `admit` per the configured fail-open/fail-closed mode;
    /// surfaces to callers only through the decision's `degraded` flag.
    #[error("Counter store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Convenience type alias for Results with LimitError.
pub type LimitResult<T> = Result<T, LimitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tier_message() {
        let err = LimitError::UnknownTier("platinum".to_string());
        assert_eq!(
            err.to_string(),
            "No rate limit policy configured for tier 'platinum'"
        );
    }

    #[test]
    fn test_store_unavailable_message() {
        let err = LimitError::StoreUnavailable("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
