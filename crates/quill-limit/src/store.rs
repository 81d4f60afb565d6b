//! Counter store port and implementations.
//!
//! The store owns ALL shared rate-limit state. The one primitive the limiter
//! needs is increment-with-expiry: bump a counter, set its TTL if this was
//! the first bump, and return the new count - as a single atomic store-side
//! operation. Increment and comparison never happen as two calls, so there
//! is no race window between concurrent processes.
//!
//! ## Implementations
//! - [`RedisCounterStore`] - production, shared across processes
//! - [`MemoryCounterStore`] - tests and single-process deployments

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::Script;

use crate::error::{LimitError, LimitResult};

// =============================================================================
// Port
// =============================================================================

/// Atomic counter store port.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increments the counter at `key`, setting its expiry to
    /// `ttl` if this was the first increment, and returns the new count.
    async fn incr_with_expiry(&self, key: &str, ttl: Duration) -> LimitResult<u64>;
}

// =============================================================================
// Redis
// =============================================================================

/// INCR + conditional EXPIRE as one atomic server-side script.
///
/// EXPIRE only on the first increment: a window's TTL is set once, when the
/// window opens, and ticks down untouched afterwards.
const INCR_WITH_EXPIRY_SCRIPT: &str = r#"
local count = redis.call('INCR', KEYS[1])
if count == 1 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
end
return count
"#;

/// Redis-backed counter store.
///
/// Uses `ConnectionManager` for automatic reconnection; the manager is cheap
/// to clone per call (it multiplexes one underlying connection).
pub struct RedisCounterStore {
    connection: ConnectionManager,
    script: Script,
    key_prefix: String,
}

impl RedisCounterStore {
    /// Connects to Redis at the given URL.
    pub async fn connect(url: &str) -> LimitResult<Self> {
        let client =
            redis::Client::open(url).map_err(|e| LimitError::StoreUnavailable(e.to_string()))?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| LimitError::StoreUnavailable(e.to_string()))?;

        Ok(RedisCounterStore {
            connection,
            script: Script::new(INCR_WITH_EXPIRY_SCRIPT),
            key_prefix: "quill:".to_string(),
        })
    }

    /// Overrides the key prefix (default `quill:`).
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }
}

impl std::fmt::Debug for RedisCounterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCounterStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn incr_with_expiry(&self, key: &str, ttl: Duration) -> LimitResult<u64> {
        let mut connection = self.connection.clone();
        let full_key = format!("{}{}", self.key_prefix, key);

        let count: u64 = self
            .script
            .key(full_key)
            .arg(ttl.as_secs())
            .invoke_async(&mut connection)
            .await
            .map_err(|e| LimitError::StoreUnavailable(e.to_string()))?;

        Ok(count)
    }
}

// =============================================================================
// In-Memory
// =============================================================================

/// In-process counter store for tests and single-process deployments.
///
/// Same semantics as the Redis store: expiry is set on the first increment
/// only, expired entries restart at 1.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    entries: Mutex<HashMap<String, (u64, Instant)>>,
}

impl MemoryCounterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for a key, if present and unexpired.
    pub fn count(&self, key: &str) -> Option<u64> {
        let entries = self.entries.lock().expect("counter map poisoned");
        entries
            .get(key)
            .filter(|(_, expires)| *expires > Instant::now())
            .map(|(count, _)| *count)
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn incr_with_expiry(&self, key: &str, ttl: Duration) -> LimitResult<u64> {
        let mut entries = self.entries.lock().expect("counter map poisoned");
        let now = Instant::now();

        let entry = entries
            .entry(key.to_string())
            .and_modify(|(count, expires)| {
                if *expires <= now {
                    // Expired window: restart
                    *count = 1;
                    *expires = now + ttl;
                } else {
                    *count += 1;
                }
            })
            .or_insert((1, now + ttl));

        Ok(entry.0)
    }
}

// =============================================================================
// Test Doubles
// =============================================================================

/// A store that always fails, for exercising fail-open / fail-closed paths.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingCounterStore {
    pub calls: std::sync::atomic::AtomicU32,
}

#[cfg(test)]
#[async_trait]
impl CounterStore for FailingCounterStore {
    async fn incr_with_expiry(&self, _key: &str, _ttl: Duration) -> LimitResult<u64> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Err(LimitError::StoreUnavailable("induced outage".to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_increments() {
        let store = MemoryCounterStore::new();
        let ttl = Duration::from_secs(60);

        assert_eq!(store.incr_with_expiry("k", ttl).await.unwrap(), 1);
        assert_eq!(store.incr_with_expiry("k", ttl).await.unwrap(), 2);
        assert_eq!(store.incr_with_expiry("other", ttl).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_expiry_restarts_count() {
        let store = MemoryCounterStore::new();

        store
            .incr_with_expiry("k", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(
            store
                .incr_with_expiry("k", Duration::from_secs(60))
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_failing_store_counts_calls() {
        let store = FailingCounterStore::default();
        assert!(store
            .incr_with_expiry("k", Duration::from_secs(1))
            .await
            .is_err());
        assert_eq!(store.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
