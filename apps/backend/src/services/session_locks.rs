//! Per-session async mutual exclusion.
//!
//! Every engine operation holds the guard for its session across the whole
//! load, validate, mutate and save sequence. Distinct sessions never contend.
//! An entry lives only while some caller holds or waits on it, so lookups of
//! unknown ids leave nothing behind.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = DashMap<String, Arc<Mutex<()>>>;

#[derive(Debug, Default)]
pub struct SessionLocks {
    inner: Arc<LockTable>,
}

/// Exclusive access to one session; the table entry is released on drop.
#[derive(Debug)]
pub struct SessionGuard {
    held: Option<OwnedMutexGuard<()>>,
    session_id: String,
    table: Arc<LockTable>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        // Unlock first so the guard's own Arc no longer counts.
        self.held.take();
        // Only the table's Arc left means no holder and no waiter.
        self.table
            .remove_if(&self.session_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `session_id`.
    pub async fn lock(&self, session_id: &str) -> SessionGuard {
        // Clone the Arc out under the shard lock, then await without it
        let mutex = self
            .inner
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let held = mutex.lock_owned().await;
        SessionGuard {
            held: Some(held),
            session_id: session_id.to_string(),
            table: Arc::clone(&self.inner),
        }
    }

    /// Number of sessions currently held or awaited.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
