//! Per-session write serialization.
//!
//! Session values are loaded at the start of a request and written back
//! after the response is built. Two overlapping writes from one shopper
//! would each start from the same snapshot and the later save would erase
//! the earlier one. Holding a per-session lock for the whole request makes
//! every write start from the previous write's result.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// How long an untouched session's lock is kept.
const LOCK_IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Locks keyed by session cookie value.
#[derive(Clone)]
pub struct SessionLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        let locks = Cache::builder()
            .max_capacity(100_000)
            .time_to_idle(LOCK_IDLE_TIMEOUT)
            .build();
        Self { locks }
    }

    /// Wait for exclusive access to a session.
    ///
    /// Access is held until the returned guard is dropped.
    pub async fn acquire(&self, session_key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .get_with(session_key.to_owned(), async { Arc::new(Mutex::new(())) })
            .await;
        lock.lock_owned().await
    }
}

impl Default for SessionLocks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(50);

    #[tokio::test(start_paused = true)]
    async fn test_same_session_waits() {
        let locks = SessionLocks::new();
        let guard = locks.acquire("abc").await;

        assert!(tokio::time::timeout(WAIT, locks.acquire("abc")).await.is_err());

        drop(guard);
        assert!(tokio::time::timeout(WAIT, locks.acquire("abc")).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_sessions_proceed() {
        let locks = SessionLocks::new();
        let _guard = locks.acquire("abc").await;

        assert!(tokio::time::timeout(WAIT, locks.acquire("xyz")).await.is_ok());
    }
}
