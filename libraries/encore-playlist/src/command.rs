//! Playlist commands

use crate::types::HistoryState;
use encore_core::TrackId;
use rand::Rng;

/// The closed set of operations that transform a `HistoryState`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistCommand {
    /// Append a new track; `cover_url: None` picks a placeholder cover
    AddTrack {
        title: String,
        cover_url: Option<String>,
    },

    /// Remove every track with this id (records history even if none match)
    RemoveTrack { id: TrackId },

    /// Empty the playlist (records history even if already empty)
    Clear,

    /// Step back one snapshot
    Undo,

    /// Step forward one snapshot
    Redo,

    /// Replace the whole state, used when restoring at startup
    Load(HistoryState),
}

impl PlaylistCommand {
    /// `AddTrack` with a placeholder cover
    pub fn add(title: impl Into<String>) -> Self {
        Self::AddTrack {
            title: title.into(),
            cover_url: None,
        }
    }

    /// `AddTrack` with an explicit cover URL
    pub fn add_with_cover(title: impl Into<String>, cover_url: impl Into<String>) -> Self {
        Self::AddTrack {
            title: title.into(),
            cover_url: Some(cover_url.into()),
        }
    }

    /// `RemoveTrack`
    pub fn remove(id: impl Into<TrackId>) -> Self {
        Self::RemoveTrack { id: id.into() }
    }

    /// Whether applying this command to `state` produces a new history entry
    /// that needs persisting
    pub fn persists_from(&self, state: &HistoryState) -> bool {
        match self {
            Self::AddTrack { .. } | Self::RemoveTrack { .. } | Self::Clear => true,
            Self::Undo => state.can_undo(),
            Self::Redo => state.can_redo(),
            Self::Load(_) => false,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTrack { .. } => "add_track",
            Self::RemoveTrack { .. } => "remove_track",
            Self::Clear => "clear",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Load(_) => "load",
        }
    }
}

/// Random placeholder cover art URL
pub fn placeholder_cover_url() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1000);
    format!("https://picsum.photos/200?random={}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_cover_format() {
        for _ in 0..100 {
            let url = placeholder_cover_url();
            let n: u32 = url
                .strip_prefix("https://picsum.photos/200?random=")
                .unwrap()
                .parse()
                .unwrap();
            assert!(n < 1000);
        }
    }

    #[test]
    fn undo_redo_only_persist_when_possible() {
        let empty = HistoryState::new();
        assert!(!PlaylistCommand::Undo.persists_from(&empty));
        assert!(!PlaylistCommand::Redo.persists_from(&empty));
        assert!(PlaylistCommand::Clear.persists_from(&empty));
        assert!(PlaylistCommand::remove("missing").persists_from(&empty));
        assert!(!PlaylistCommand::Load(HistoryState::new()).persists_from(&empty));

        let with_past = HistoryState {
            past: vec![vec![]],
            ..HistoryState::default()
        };
        assert!(PlaylistCommand::Undo.persists_from(&with_past));
    }
}
