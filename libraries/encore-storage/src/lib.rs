//! Encore Storage
//!
//! Device-local key-value persistence for Encore.
//!
//! Every backend implements [`encore_core::KeyValueStore`], so feature crates
//! (playlist history, theme, session) never know where their bytes end up.
//!
//! # Backends
//!
//! - **`MemoryStore`**: process-local map, for tests and ephemeral sessions
//! - **`FileStore`**: a single JSON object on disk, rewritten atomically
//! - **`SqliteStore`**: one row per key in a `SQLite` table
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_core::KeyValueStore;
//! use encore_storage::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::connect("sqlite://encore.db").await?;
//! store.set("isLoggedIn", "true").await?;
//! assert_eq!(store.get("isLoggedIn").await?, Some("true".to_string()));
//! # Ok(())
//! # }
//! ```

mod error;
mod file;
mod memory;
mod sqlite;

pub use error::{Result, StorageError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Applied migrations are tracked in `_sqlx_migrations`, so this is safe to
/// call on every startup.
///
/// # Errors
///
/// Returns an error if a migration fails to apply
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://encore.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    // In-memory databases are per-connection; a second connection would see an empty schema
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    Ok(pool)
}
