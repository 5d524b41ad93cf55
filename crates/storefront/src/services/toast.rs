//! Toast notifications.
//!
//! A toast is a short status message ("Added to cart") that disappears on its
//! own 2.2 seconds after it is shown. Each shopper session gets its own queue;
//! queues are kept in a [`ToastRegistry`] and dropped when the session goes
//! idle.
//!
//! Every toast's removal is a spawned task owned by its queue. Dropping the
//! queue aborts all of them, so no timer outlives the session it belongs to.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_millis(2200);

/// How long an untouched session's queue is kept.
const QUEUE_IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Toast identifier: milliseconds since the epoch at creation, bumped past
/// the previous identifier so two toasts in the same millisecond stay
/// distinct and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(i64);

impl ToastId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

/// A visible toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
}

#[derive(Debug, Default)]
struct QueueState {
    toasts: Vec<Toast>,
    timers: HashMap<ToastId, JoinHandle<()>>,
    last_id: i64,
}

impl QueueState {
    fn next_id(&mut self, now_millis: i64) -> ToastId {
        self.last_id = now_millis.max(self.last_id.saturating_add(1));
        ToastId(self.last_id)
    }

    fn expire(&mut self, id: ToastId) {
        self.toasts.retain(|t| t.id != id);
        self.timers.remove(&id);
    }
}

/// One session's live toasts, in creation order.
#[derive(Debug)]
pub struct ToastQueue {
    state: Arc<Mutex<QueueState>>,
    duration: Duration,
}

impl ToastQueue {
    /// Create an empty queue whose toasts last [`TOAST_DURATION`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_duration(TOAST_DURATION)
    }

    /// Create an empty queue with a custom toast lifetime.
    #[must_use]
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            duration,
        }
    }

    /// Show a toast and schedule its removal.
    ///
    /// Identical messages are not merged; each call yields its own toast.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn show(&self, message: impl Into<String>) -> Toast {
        let mut state = lock(&self.state);

        let toast = Toast {
            id: state.next_id(Utc::now().timestamp_millis()),
            message: message.into(),
        };
        state.toasts.push(toast.clone());

        let id = toast.id;
        let duration = self.duration;
        let weak: Weak<Mutex<QueueState>> = Arc::downgrade(&self.state);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(state) = weak.upgrade() {
                lock(&state).expire(id);
                tracing::debug!(toast_id = id.as_i64(), "Toast expired");
            }
        });
        state.timers.insert(id, timer);

        tracing::debug!(toast_id = id.as_i64(), message = %toast.message, "Toast shown");
        toast
    }

    /// Remove a toast before it expires. Returns `false` if it is already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut state = lock(&self.state);
        let before = state.toasts.len();
        state.toasts.retain(|t| t.id != id);
        if let Some(timer) = state.timers.remove(&id) {
            timer.abort();
        }
        state.toasts.len() != before
    }

    /// Live toasts in creation order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        lock(&self.state).toasts.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.state).toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ToastQueue {
    fn drop(&mut self) {
        for (_, timer) in lock(&self.state).timers.drain() {
            timer.abort();
        }
    }
}

// A panic while holding the lock leaves the toast list consistent (every
// mutation is a single push/retain), so poisoning is ignored.
fn lock(state: &Mutex<QueueState>) -> MutexGuard<'_, QueueState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Toast queues for every active session.
///
/// Queues are keyed by a per-session channel ID and evicted after a day
/// without access. Eviction drops the queue and cancels its pending timers.
#[derive(Clone)]
pub struct ToastRegistry {
    queues: Cache<Uuid, Arc<ToastQueue>>,
}

impl ToastRegistry {
    #[must_use]
    pub fn new() -> Self {
        let queues = Cache::builder()
            .max_capacity(10_000)
            .time_to_idle(QUEUE_IDLE_TIMEOUT)
            .build();
        Self { queues }
    }

    /// The queue for a channel, created on first use.
    pub async fn queue(&self, channel: Uuid) -> Arc<ToastQueue> {
        self.queues
            .get_with(channel, async { Arc::new(ToastQueue::new()) })
            .await
    }

    /// The queue for a channel, if one exists.
    pub async fn existing(&self, channel: Uuid) -> Option<Arc<ToastQueue>> {
        self.queues.get(&channel).await
    }
}

impl Default for ToastRegistry {
    fn default() -> Self {
        Self::new()
    }
}
