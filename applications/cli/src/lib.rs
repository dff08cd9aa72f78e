//! Encore CLI Library
//!
//! Command-line front end over the playlist history, theme, session, profile
//! and geofence crates. Exposed as a library so the handlers can be tested
//! without spawning the binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use commands::{open_store, App};
pub use config::{EncoreConfig, StorageBackend};
pub use error::{CliError, Result};
