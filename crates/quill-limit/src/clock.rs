//! Clock port for window arithmetic.
//!
//! Time sits behind a trait so the fixed-window math is testable: production
//! uses the system clock, tests advance a mock past `reset_at` and watch a
//! fresh window open.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of "now" in unix seconds.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current unix timestamp in seconds.
    fn now_unix(&self) -> u64;
}

/// System clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        // A system time before the epoch means the host clock is broken;
        // treat it as the epoch rather than panic in request handling.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// A settable clock for deterministic tests.
#[derive(Debug, Default)]
pub struct MockClock {
    now: std::sync::atomic::AtomicU64,
}

impl MockClock {
    /// Create a mock clock starting at the given unix timestamp.
    pub fn starting_at(now: u64) -> Self {
        MockClock {
            now: std::sync::atomic::AtomicU64::new(now),
        }
    }

    /// Advance the clock by `secs` seconds.
    pub fn advance(&self, secs: u64) {
        self.now
            .fetch_add(secs, std::sync::atomic::Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_unix(&self) -> u64 {
        self.now.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_sane() {
        // Any plausible run of this test is after 2020-01-01
        assert!(SystemClock::new().now_unix() > 1_577_836_800);
    }

    #[test]
    fn test_mock_clock_advances() {
        let clock = MockClock::starting_at(1_000);
        assert_eq!(clock.now_unix(), 1_000);
        clock.advance(60);
        assert_eq!(clock.now_unix(), 1_060);
    }
}
