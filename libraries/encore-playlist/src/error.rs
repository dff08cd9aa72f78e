//! Error types for playlist history

use thiserror::Error;

/// Playlist history errors
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// Command rejected by validation (state is unchanged)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Snapshot could not be read from the key-value store
    #[error("Failed to read playlist snapshot: {0}")]
    PersistenceRead(String),

    /// Snapshot could not be written to the key-value store
    #[error("Failed to write playlist snapshot: {0}")]
    PersistenceWrite(String),

    /// No tokio runtime to run the snapshot writer on
    #[error("Playlist history needs a tokio runtime: {0}")]
    NoRuntime(String),

    /// Snapshot JSON could not be encoded or decoded
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for playlist operations
pub type Result<T> = std::result::Result<T, PlaylistError>;
