//! # Rate Limiter
//!
//! Fixed-window admission control over the shared counter store.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    admit(identity, tier)                                │
//! │                                                                         │
//! │  policy ← table[tier]            (unknown tier → configuration error)  │
//! │  window_start ← ⌊now / window⌋ × window                                │
//! │  key ← ratelimit:{tier}:{identity}:{window_start}                       │
//! │                                                                         │
//! │  count ← store.incr_with_expiry(key, window)   ── ONE atomic call      │
//! │                                                                         │
//! │  count ≤ maximum ? admit (remaining = maximum - count)                  │
//! │                  : reject (reset_at = window_start + window)            │
//! │                                                                         │
//! │  store failure → retry once → configured fail-open / fail-closed,      │
//! │                  decision flagged degraded, warning logged              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A request arriving exactly at a window boundary belongs to the NEW window:
//! the boundary is computed by floor division, so equality goes to the later
//! window.
//!
//! ## Cancellation
//! If a caller is cancelled while the store call is in flight, the increment
//! may still land store-side - the operation is not transactional with
//! cancellation. This at-least-once increment is accepted; the counter only
//! ever errs toward stricter limiting, and the key expires with its window.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{LimitError, LimitResult};
use crate::policy::{FailureMode, PolicyTable};
use crate::store::CounterStore;

/// Bound on each counter-store round trip.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(500);

// =============================================================================
// Decision
// =============================================================================

/// The outcome of one admission check.
///
/// Rejection is a normal, typed result - NOT an error. Callers short-circuit
/// on `allowed = false` and use `reset_at` to implement backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Whether the request is admitted.
    pub allowed: bool,

    /// Requests left in the current window (0 when rejected or degraded).
    pub remaining: u64,

    /// Unix timestamp (seconds) when the current window ends.
    pub reset_at: u64,

    /// True when the store was unreachable and the configured failure mode
    /// decided the outcome. Never silent: a warning is logged alongside.
    pub degraded: bool,
}

// =============================================================================
// Rate Limiter
// =============================================================================

/// Per-identity, per-tier fixed-window rate limiter.
///
/// Holds no locks and no local counters: every shared mutable bit lives in
/// the external store, so any number of threads or processes may call
/// [`RateLimiter::admit`] concurrently against the same quota.
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    policies: PolicyTable,
    mode: FailureMode,
    clock: Arc<dyn Clock>,
    store_timeout: Duration,
}

impl RateLimiter {
    /// Creates a limiter over the given store and policy table.
    pub fn new(store: Arc<dyn CounterStore>, policies: PolicyTable, mode: FailureMode) -> Self {
        RateLimiter {
            store,
            policies,
            mode,
            clock: Arc::new(SystemClock::new()),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Replaces the clock (tests use a mock to step across windows).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Overrides the per-call store timeout.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Decides whether to admit one request from `identity` in `tier`.
    ///
    /// Called once per inbound request, BEFORE any computation. On
    /// `allowed = false` the caller must short-circuit without invoking any
    /// downstream work.
    ///
    /// ## Errors
    /// Only configuration defects surface as errors (unknown tier). Store
    /// outages are absorbed into a degraded [`Decision`] per the configured
    /// [`FailureMode`].
    pub async fn admit(&self, identity: &str, tier: &str) -> LimitResult<Decision> {
        let policy = *self.policies.policy_for(tier)?;

        let window_secs = policy.window.as_secs();
        let now = self.clock.now_unix();
        let window_start = now / window_secs * window_secs;
        let reset_at = window_start + window_secs;

        let key = format!("ratelimit:{tier}:{identity}:{window_start}");

        let count = match self.incr_with_retry(&key, policy.window).await {
            Ok(count) => count,
            Err(error) => {
                let allowed = matches!(self.mode, FailureMode::FailOpen);
                warn!(
                    %identity,
                    %tier,
                    mode = %self.mode,
                    allowed,
                    %error,
                    "Counter store unavailable; applying configured failure mode"
                );
                return Ok(Decision {
                    allowed,
                    remaining: 0,
                    reset_at,
                    degraded: true,
                });
            }
        };

        if count <= policy.max_requests {
            Ok(Decision {
                allowed: true,
                remaining: policy.max_requests - count,
                reset_at,
                degraded: false,
            })
        } else {
            debug!(%identity, %tier, count, maximum = policy.max_requests, reset_at, "Quota exceeded");
            Ok(Decision {
                allowed: false,
                remaining: 0,
                reset_at,
                degraded: false,
            })
        }
    }

    /// One bounded store call, retried at most once on failure.
    async fn incr_with_retry(&self, key: &str, ttl: Duration) -> LimitResult<u64> {
        match self.incr_once(key, ttl).await {
            Ok(count) => Ok(count),
            Err(first) => {
                debug!(%key, error = %first, "Counter store call failed; retrying once");
                self.incr_once(key, ttl).await
            }
        }
    }

    /// One store call under the configured timeout.
    async fn incr_once(&self, key: &str, ttl: Duration) -> LimitResult<u64> {
        match tokio::time::timeout(self.store_timeout, self.store.incr_with_expiry(key, ttl)).await
        {
            Ok(result) => result,
            Err(_) => Err(LimitError::StoreUnavailable(format!(
                "timed out after {:?}",
                self.store_timeout
            ))),
        }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("mode", &self.mode)
            .field("tiers", &self.policies.len())
            .field("store_timeout", &self.store_timeout)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
