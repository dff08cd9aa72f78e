use super::ids::TrackId;
use serde::{Deserialize, Serialize};

/// A single playlist entry
///
/// Serialized as `{"id": ..., "title": ..., "coverUrl": ...}`. The older
/// `cover` key is still accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique within a single playlist snapshot
    pub id: TrackId,

    /// Display title (already trimmed, never empty when created via a command)
    pub title: String,

    /// Cover art URL, purely cosmetic
    #[serde(rename = "coverUrl", alias = "cover")]
    pub cover_url: String,
}

impl Track {
    /// Create a track from its parts without validation
    pub fn new(id: TrackId, title: impl Into<String>, cover_url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            cover_url: cover_url.into(),
        }
    }
}
