//! # quill-limit: Rate Limiting for Quill Invoicing
//!
//! Per-identity, per-tier fixed-window rate limiting against a shared,
//! network-accessible counter store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         quill-limit                                     │
//! │                                                                         │
//! │   invoice-api ──► RateLimiter::admit(identity, tier)                    │
//! │                        │                                                │
//! │                        ├── PolicyTable (tier → max / window)            │
//! │                        ├── Clock       (window arithmetic)              │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   CounterStore port                                     │
//! │                   ┌──────────────┴──────────────┐                       │
//! │            RedisCounterStore           MemoryCounterStore               │
//! │            (shared, production)        (tests, single process)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Zero shared mutable state in-process**: all coordination is the
//!    store's atomic increment-with-expiry; no locks, no local caches
//! 2. **Rejection is data, not an error**: [`Decision`] carries `allowed`,
//!    `remaining` and `reset_at` for caller backoff
//! 3. **Failure policy is explicit**: fail-open vs fail-closed is
//!    configuration, and a degraded decision is always flagged and logged
//! 4. **No default tier**: an unknown tier is a configuration error
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use quill_limit::{FailureMode, PolicyTable, RateLimiter, RedisCounterStore};
//!
//! # async fn example() -> Result<(), quill_limit::LimitError> {
//! let store = Arc::new(RedisCounterStore::connect("redis://127.0.0.1/").await?);
//! let policies = PolicyTable::new()
//!     .with_tier("anonymous", 100, Duration::from_secs(60))?
//!     .with_tier("premium", 5000, Duration::from_secs(60))?;
//!
//! let limiter = RateLimiter::new(store, policies, FailureMode::FailOpen);
//!
//! let decision = limiter.admit("client-42", "premium").await?;
//! if !decision.allowed {
//!     // back off until decision.reset_at
//! }
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod limiter;
pub mod policy;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, SystemClock};
pub use error::{LimitError, LimitResult};
pub use limiter::{Decision, RateLimiter, DEFAULT_STORE_TIMEOUT};
pub use policy::{FailureMode, PolicyTable, RateLimitPolicy};
pub use store::{CounterStore, MemoryCounterStore, RedisCounterStore};
