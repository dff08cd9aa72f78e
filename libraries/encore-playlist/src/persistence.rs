//! Snapshot persistence
//!
//! Reads happen once at startup. Writes go through a background task fed by
//! an unbounded channel, so dispatching a command never waits on storage.
//! Snapshots are written in the order they were queued; when several are
//! waiting, only the newest is written (last write wins).

use crate::error::{PlaylistError, Result};
use crate::types::HistoryState;
use encore_core::KeyValueStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Read and decode the snapshot stored under `key`
///
/// Returns `Ok(None)` if nothing was stored.
pub async fn load_snapshot(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<HistoryState>> {
    let raw = store
        .get(key)
        .await
        .map_err(|e| PlaylistError::PersistenceRead(e.to_string()))?;

    match raw {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write `state` under `key`
pub async fn save_snapshot(store: &dyn KeyValueStore, key: &str, state: &HistoryState) -> Result<()> {
    let json = serde_json::to_string(state)?;
    store
        .set(key, &json)
        .await
        .map_err(|e| PlaylistError::PersistenceWrite(e.to_string()))
}

enum WriterMessage {
    Snapshot(String),
    Flush(oneshot::Sender<()>),
}

/// Counters shared between the writer task and its handle
#[derive(Debug, Default)]
struct WriterStats {
    writes: AtomicU64,
    failures: AtomicU64,
}

/// Handle to the background snapshot writer
///
/// Dropping the handle closes the channel; the task finishes any queued
/// write and exits.
#[derive(Debug)]
pub(crate) struct SnapshotWriter {
    tx: mpsc::UnboundedSender<WriterMessage>,
    stats: Arc<WriterStats>,
}

impl std::fmt::Debug for WriterMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snapshot(json) => write!(f, "Snapshot({} bytes)", json.len()),
            Self::Flush(_) => write!(f, "Flush"),
        }
    }
}

impl SnapshotWriter {
    /// Spawn the writer task on the current tokio runtime
    pub(crate) fn spawn(store: Arc<dyn KeyValueStore>, key: String) -> Self {
        Self::spawn_on(&Handle::current(), store, key)
    }

    /// Spawn the writer task on `handle`
    pub(crate) fn spawn_on(handle: &Handle, store: Arc<dyn KeyValueStore>, key: String) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stats = Arc::new(WriterStats::default());

        handle.spawn(run_writer(store, key, rx, Arc::clone(&stats)));

        Self { tx, stats }
    }

    /// Queue a serialized snapshot
    pub(crate) fn enqueue(&self, json: String) {
        if self.tx.send(WriterMessage::Snapshot(json)).is_err() {
            warn!("Playlist snapshot writer has stopped; snapshot dropped");
        }
    }

    /// Wait until everything queued before this call has been written or failed
    pub(crate) async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(WriterMessage::Flush(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.await;
    }

    /// Successful writes so far
    pub(crate) fn writes(&self) -> u64 {
        self.stats.writes.load(Ordering::Relaxed)
    }

    /// Failed writes so far
    pub(crate) fn failures(&self) -> u64 {
        self.stats.failures.load(Ordering::Relaxed)
    }
}

async fn run_writer(
    store: Arc<dyn KeyValueStore>,
    key: String,
    mut rx: mpsc::UnboundedReceiver<WriterMessage>,
    stats: Arc<WriterStats>,
) {
    while let Some(message) = rx.recv().await {
        let mut latest = None;
        let mut acks = Vec::new();

        match message {
            WriterMessage::Snapshot(json) => latest = Some(json),
            WriterMessage::Flush(ack) => acks.push(ack),
        }

        // Coalesce whatever else is already queued
        while let Ok(message) = rx.try_recv() {
            match message {
                WriterMessage::Snapshot(json) => latest = Some(json),
                WriterMessage::Flush(ack) => acks.push(ack),
            }
        }

        if let Some(json) = latest {
            match store.set(&key, &json).await {
                Ok(()) => {
                    stats.writes.fetch_add(1, Ordering::Relaxed);
                    debug!(key = %key, bytes = json.len(), "Saved playlist snapshot");
                }
                Err(e) => {
                    stats.failures.fetch_add(1, Ordering::Relaxed);
                    let err = PlaylistError::PersistenceWrite(e.to_string());
                    warn!(key = %key, error = %err, "Playlist snapshot not saved; keeping in-memory state");
                }
            }
        }

        for ack in acks {
            let _ = ack.send(());
        }
    }

    debug!(key = %key, "Playlist snapshot writer stopped");
}
