/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] encore_core::EncoreError),

    #[error(transparent)]
    Playlist(#[from] encore_playlist::PlaylistError),

    #[error(transparent)]
    Preferences(#[from] encore_preferences::PreferencesError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<encore_storage::StorageError> for CliError {
    fn from(err: encore_storage::StorageError) -> Self {
        CliError::Storage(err.into())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
