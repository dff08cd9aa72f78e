//! Error types for preferences

use crate::profile::ProfileFieldError;
use thiserror::Error;

/// Preference errors
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// Rejected input (blank credentials, malformed colors)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One or more profile fields failed validation
    #[error("Profile is invalid: {}", format_field_errors(.0))]
    Validation(Vec<ProfileFieldError>),

    /// Key-value store failure
    #[error("Storage error: {0}")]
    Storage(#[from] encore_core::EncoreError),

    /// JSON encode/decode failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_field_errors(errors: &[ProfileFieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for preference operations
pub type Result<T> = std::result::Result<T, PreferencesError>;
