//! Core types for playlist history

use encore_core::Track;
use serde::{Deserialize, Serialize};

/// Default key the history snapshot is stored under
pub const DEFAULT_STORAGE_KEY: &str = "playlistState";

/// Full undo/redo-capable playlist state
///
/// `past` and `future` hold complete copies of `present`, never diffs.
/// This is also the persisted format:
/// `{"past": [[Track]], "present": [Track], "future": [[Track]]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Previous snapshots, oldest first
    pub past: Vec<Vec<Track>>,

    /// Current playlist in insertion order
    pub present: Vec<Track>,

    /// Undone snapshots, most recently undone first
    pub future: Vec<Vec<Track>>,
}

impl HistoryState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `Undo` would change anything
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether `Redo` would change anything
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Drop history beyond `max` entries on each side
    ///
    /// Oldest `past` entries and furthest `future` entries go first, so the
    /// snapshots adjacent to `present` are always the ones retained.
    pub(crate) fn enforce_limit(&mut self, max: Option<usize>) {
        let Some(max) = max else {
            return;
        };

        if self.past.len() > max {
            let excess = self.past.len() - max;
            self.past.drain(..excess);
        }
        self.future.truncate(max);
    }
}

/// Configuration for the history store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Key the snapshot is persisted under (default: `playlistState`)
    pub storage_key: String,

    /// Maximum snapshots kept in each of `past` and `future` (default: unbounded)
    pub max_history: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_history: None,
        }
    }
}
