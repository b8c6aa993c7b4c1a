//! Debounced persistence: mutations coalesce into one write.
//!
//! Every scheduled save (re)starts a fixed-delay timer; a newer mutation
//! inside the window aborts the pending write and replaces its snapshot.
//! `flush` cancels the timer and writes immediately.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;
use watchlog_models::WatchRecord;

use crate::storage::JsonStorage;

/// Default coalescing window
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(400);

pub struct SaveDebouncer {
    storage: Arc<JsonStorage>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SaveDebouncer {
    pub fn new(storage: JsonStorage, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            storage: Arc::new(storage),
            delay,
            pending: Mutex::new(None),
        })
    }

    /// Schedule a save of the snapshot after the delay, replacing any save
    /// still pending
    pub fn schedule(self: &Arc<Self>, snapshot: Vec<WatchRecord>) {
        let storage = self.storage.clone();
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = storage.save(&snapshot) {
                warn!("Debounced save failed: {}", e);
            }
        });

        let mut pending = self.pending.lock().unwrap();
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }

    /// Cancel any pending timer and write the snapshot right now
    pub fn flush(&self, snapshot: &[WatchRecord]) -> Result<()> {
        if let Some(previous) = self.pending.lock().unwrap().take() {
            previous.abort();
        }
        self.storage.save(snapshot)
    }

    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap()
            .as_ref()
            .map(|t| !t.is_finished())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlog_models::{MediaKind, WatchStatus};

    fn record(title: &str) -> WatchRecord {
        WatchRecord::new(title, WatchStatus::Watched, MediaKind::Movie)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_burst_of_mutations_coalesces_into_last_write() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());
        let debouncer = SaveDebouncer::new(storage.clone(), Duration::from_millis(50));

        debouncer.schedule(vec![record("first")]);
        debouncer.schedule(vec![record("second")]);
        let winner = record("third");
        debouncer.schedule(vec![winner.clone()]);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let saved = storage.load();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, winner.id);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_flush_cancels_pending_timer() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());
        let debouncer = SaveDebouncer::new(storage.clone(), Duration::from_secs(60));

        debouncer.schedule(vec![record("pending")]);
        assert!(debouncer.has_pending());

        let flushed = record("flushed");
        debouncer.flush(std::slice::from_ref(&flushed)).unwrap();
        assert!(!debouncer.has_pending());

        let saved = storage.load();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, flushed.id);
    }
}
