//! Encore - Playlist History
//!
//! A local playlist with linear undo/redo, persisted as a JSON snapshot.
//!
//! This crate provides:
//! - `HistoryState`: `past` / `present` / `future` snapshots
//! - `PlaylistCommand`: the closed set of six commands
//! - `apply` / `apply_with_limit`: the pure reducer
//! - `PlaylistHistoryStore`: owns the state, restores it at startup and
//!   writes a snapshot after every mutation without blocking the caller
//!
//! # Example: Reducer
//!
//! ```rust
//! use encore_playlist::{apply, HistoryState, PlaylistCommand};
//!
//! let s0 = HistoryState::new();
//! let s1 = apply(&s0, PlaylistCommand::add("Intro")).unwrap();
//! assert_eq!(s1.present.len(), 1);
//!
//! let undone = apply(&s1, PlaylistCommand::Undo).unwrap();
//! assert_eq!(undone.present, s0.present);
//! assert!(undone.can_redo());
//! ```
//!
//! # Example: Store
//!
//! ```rust
//! use encore_playlist::{HistoryConfig, PlaylistHistoryStore};
//! use encore_storage::MemoryStore;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let kv = Arc::new(MemoryStore::new());
//! let mut playlist = PlaylistHistoryStore::restore(kv, HistoryConfig::default()).await;
//!
//! playlist.add_track("Intro", None).unwrap();
//! assert!(playlist.add_track("   ", None).is_err());
//! assert!(playlist.can_undo());
//!
//! playlist.flush().await;
//! # }
//! ```

mod command;
mod error;
mod persistence;
mod reducer;
mod store;
mod types;

// Public exports
pub use command::{placeholder_cover_url, PlaylistCommand};
pub use error::{PlaylistError, Result};
pub use persistence::{load_snapshot, save_snapshot};
pub use reducer::{apply, apply_with_limit};
pub use store::PlaylistHistoryStore;
pub use types::{HistoryConfig, HistoryState, DEFAULT_STORAGE_KEY};
