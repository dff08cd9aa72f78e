//! Playlist history store - owns the state and persists it
//!
//! The store is a plain owned value: the presentation layer holds it and
//! dispatches commands through `&mut self`. There is no global instance.

use crate::command::PlaylistCommand;
use crate::error::{PlaylistError, Result};
use crate::persistence::{load_snapshot, SnapshotWriter};
use crate::reducer::apply_with_limit;
use crate::types::{HistoryConfig, HistoryState};
use encore_core::{KeyValueStore, Track, TrackId};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Undo/redo playlist with write-behind persistence
///
/// The snapshot writer runs as a task on the tokio runtime the store was
/// created in.
#[derive(Debug)]
pub struct PlaylistHistoryStore {
    state: HistoryState,
    config: HistoryConfig,
    writer: SnapshotWriter,
    loaded: bool,
}

impl PlaylistHistoryStore {
    /// Create a store with empty history, without reading persisted state
    ///
    /// # Errors
    /// Returns `PlaylistError::NoRuntime` when called outside a tokio runtime.
    pub fn new(store: Arc<dyn KeyValueStore>, config: HistoryConfig) -> Result<Self> {
        let handle = Handle::try_current().map_err(|e| PlaylistError::NoRuntime(e.to_string()))?;
        Ok(Self::with_writer(
            SnapshotWriter::spawn_on(&handle, store, config.storage_key.clone()),
            config,
        ))
    }

    fn with_writer(writer: SnapshotWriter, config: HistoryConfig) -> Self {
        Self {
            state: HistoryState::new(),
            config,
            writer,
            loaded: false,
        }
    }

    /// Create a store and restore the latest persisted snapshot
    ///
    /// Missing, unreadable, or malformed snapshots all fall back to an empty
    /// history; the failure is logged, never returned. Must be awaited on a
    /// tokio runtime.
    pub async fn restore(store: Arc<dyn KeyValueStore>, config: HistoryConfig) -> Self {
        let snapshot = match load_snapshot(store.as_ref(), &config.storage_key).await {
            Ok(Some(snapshot)) => {
                info!(
                    key = %config.storage_key,
                    tracks = snapshot.present.len(),
                    past = snapshot.past.len(),
                    future = snapshot.future.len(),
                    "Restored playlist history"
                );
                Some(snapshot)
            }
            Ok(None) => {
                debug!(key = %config.storage_key, "No saved playlist history");
                None
            }
            Err(e) => {
                warn!(key = %config.storage_key, error = %e, "Starting with empty playlist history");
                None
            }
        };

        let writer = SnapshotWriter::spawn(store, config.storage_key.clone());
        let mut this = Self::with_writer(writer, config);
        if let Some(snapshot) = snapshot {
            this.apply_command(PlaylistCommand::Load(snapshot));
        }
        this.loaded = true;
        this
    }

    /// Apply a command and queue a snapshot write if history changed
    ///
    /// # Errors
    /// Returns `PlaylistError::InvalidInput` for an add with a blank title;
    /// the state is left unchanged.
    pub fn dispatch(&mut self, command: PlaylistCommand) -> Result<()> {
        let name = command.name();
        let persist = command.persists_from(&self.state);
        let loads = matches!(command, PlaylistCommand::Load(_));

        self.state = apply_with_limit(&self.state, command, self.config.max_history)?;

        debug!(
            command = name,
            tracks = self.state.present.len(),
            past = self.state.past.len(),
            future = self.state.future.len(),
            "Applied playlist command"
        );

        if loads {
            self.loaded = true;
        }
        if persist {
            self.persist();
        }
        Ok(())
    }

    /// Apply a command that cannot fail validation
    fn apply_command(&mut self, command: PlaylistCommand) {
        if let Err(e) = self.dispatch(command) {
            warn!(error = %e, "Playlist command rejected");
        }
    }

    /// Add a track and return its id
    ///
    /// # Errors
    /// Returns `PlaylistError::InvalidInput` if `title` is blank after trimming
    pub fn add_track(&mut self, title: &str, cover_url: Option<&str>) -> Result<TrackId> {
        self.dispatch(PlaylistCommand::AddTrack {
            title: title.to_string(),
            cover_url: cover_url.map(str::to_string),
        })?;

        // The new track is always last in `present`
        self.state
            .present
            .last()
            .map(|track| track.id.clone())
            .ok_or_else(|| PlaylistError::InvalidInput("track was not added".to_string()))
    }

    /// Remove the track with `id`
    pub fn remove_track(&mut self, id: &TrackId) {
        self.apply_command(PlaylistCommand::RemoveTrack { id: id.clone() });
    }

    /// Remove every track
    pub fn clear(&mut self) {
        self.apply_command(PlaylistCommand::Clear);
    }

    /// Step back; returns false if there was nothing to undo
    pub fn undo(&mut self) -> bool {
        let changed = self.state.can_undo();
        self.apply_command(PlaylistCommand::Undo);
        changed
    }

    /// Step forward; returns false if there was nothing to redo
    pub fn redo(&mut self) -> bool {
        let changed = self.state.can_redo();
        self.apply_command(PlaylistCommand::Redo);
        changed
    }

    /// Replace the whole state (not persisted)
    pub fn load(&mut self, snapshot: HistoryState) {
        self.apply_command(PlaylistCommand::Load(snapshot));
    }

    /// Current playlist
    pub fn present(&self) -> &[Track] {
        &self.state.present
    }

    /// Full state including history
    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    /// Whether the startup load has finished
    ///
    /// Always true after `restore`, even when it fell back to empty history.
    /// A store from `new` reports false until a snapshot is loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether undo is available
    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    /// Whether redo is available
    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    /// Number of undoable steps
    pub fn past_len(&self) -> usize {
        self.state.past.len()
    }

    /// Number of redoable steps
    pub fn future_len(&self) -> usize {
        self.state.future.len()
    }

    /// Store configuration
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Wait for every queued snapshot to be written (or to fail)
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Snapshots written successfully
    pub fn persisted_writes(&self) -> u64 {
        self.writer.writes()
    }

    /// Snapshot writes that failed
    pub fn failed_writes(&self) -> u64 {
        self.writer.failures()
    }

    fn persist(&self) {
        match serde_json::to_string(&self.state) {
            Ok(json) => self.writer.enqueue(json),
            Err(e) => warn!(error = %e, "Failed to serialize playlist history"),
        }
    }
}
