//! Rate limit policies and the per-tier policy table.
//!
//! ## Tier Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Policy Table                                     │
//! │                                                                         │
//! │   tier name      maximum     window                                     │
//! │   ──────────     ───────     ──────                                     │
//! │   anonymous          100        60s                                     │
//! │   authenticated     1000        60s      (example deployment values)    │
//! │   premium           5000        60s                                     │
//! │                                                                         │
//! │   Loaded at startup, immutable thereafter. The exact tier names and    │
//! │   quota numbers are DEPLOYMENT configuration - this crate ships no     │
//! │   defaults and an unknown tier is an error, never a fallback.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LimitError, LimitResult};

// =============================================================================
// Policy
// =============================================================================

/// Quota for one caller tier: at most `max_requests` per fixed `window`.
///
/// Deliberately not deserializable: every instance must pass through
/// [`RateLimitPolicy::new`], so the window-arithmetic in the limiter never
/// sees a zero window or a zero maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Maximum admitted requests per window.
    pub max_requests: u64,

    /// Window duration. Also the TTL of the window's counter key.
    pub window: Duration,
}

impl RateLimitPolicy {
    /// Creates a policy, rejecting degenerate values.
    pub fn new(tier: &str, max_requests: u64, window: Duration) -> LimitResult<Self> {
        if max_requests == 0 {
            return Err(LimitError::InvalidPolicy {
                tier: tier.to_string(),
                reason: "maximum must be at least 1".to_string(),
            });
        }
        if window.as_secs() == 0 {
            return Err(LimitError::InvalidPolicy {
                tier: tier.to_string(),
                reason: "window must be at least 1 second".to_string(),
            });
        }

        Ok(RateLimitPolicy {
            max_requests,
            window,
        })
    }
}

// =============================================================================
// Policy Table
// =============================================================================

/// The process-wide tier → policy table.
///
/// Built once at startup; lookups after that are read-only. A missing tier is
/// a [`LimitError::UnknownTier`] - there is deliberately no default tier.
/// The only way in is [`PolicyTable::with_tier`], which validates each entry;
/// configuration formats parse into the builder, never into the table.
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    tiers: HashMap<String, RateLimitPolicy>,
}

impl PolicyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tier policy, consuming and returning the table (builder style).
    pub fn with_tier(
        mut self,
        tier: impl Into<String>,
        max_requests: u64,
        window: Duration,
    ) -> LimitResult<Self> {
        let tier = tier.into();
        let policy = RateLimitPolicy::new(&tier, max_requests, window)?;
        self.tiers.insert(tier, policy);
        Ok(self)
    }

    /// Looks up the policy for a tier.
    pub fn policy_for(&self, tier: &str) -> LimitResult<&RateLimitPolicy> {
        self.tiers
            .get(tier)
            .ok_or_else(|| LimitError::UnknownTier(tier.to_string()))
    }

    /// Number of configured tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Whether no tiers are configured.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Iterates over configured tier names.
    pub fn tier_names(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }
}

// =============================================================================
// Failure Mode
// =============================================================================

/// Behavior when the counter store is unavailable.
///
/// An explicit configuration surface, not a hidden default: availability of
/// invoicing versus strict quota enforcement is a deployment decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureMode {
    /// Admit requests while the store is down (availability first).
    FailOpen,
    /// Reject requests while the store is down (enforcement first).
    FailClosed,
}

impl std::str::FromStr for FailureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-open" | "fail_open" | "open" => Ok(FailureMode::FailOpen),
            "fail-closed" | "fail_closed" | "closed" => Ok(FailureMode::FailClosed),
            other => Err(format!(
                "invalid failure mode '{other}' (expected 'fail-open' or 'fail-closed')"
            )),
        }
    }
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureMode::FailOpen => write!(f, "fail-open"),
            FailureMode::FailClosed => write!(f, "fail-closed"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
