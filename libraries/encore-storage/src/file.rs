//! JSON-file key-value store
//!
//! All keys live in one JSON object. Every write rewrites the whole file via
//! a temp file and rename, so a crash mid-write leaves the previous contents.

use crate::error::StorageError;
use async_trait::async_trait;
use encore_core::{KeyValueStore, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::warn;

/// Key-value store backed by a single JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,

    /// Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> std::result::Result<BTreeMap<String, String>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            StorageError::SerializationError(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Entries to modify in a write
    ///
    /// A file that is not a JSON object is moved aside to `*.corrupt` and
    /// treated as empty, so one bad write does not block every later one.
    async fn read_for_update(&self) -> std::result::Result<BTreeMap<String, String>, StorageError> {
        match self.read_all().await {
            Err(StorageError::SerializationError(reason)) => {
                let aside = self.path.with_extension("json.corrupt");
                warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    error = %reason,
                    "Store file is corrupt; starting over"
                );
                tokio::fs::rename(&self.path, &aside).await?;
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn write_all(
        &self,
        entries: &BTreeMap<String, String>,
    ) -> std::result::Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_for_update().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await?;
        tracing::debug!(key, path = %self.path.display(), "Wrote key");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_for_update().await?;
        if entries.remove(key).is_some() {
            self.write_all(&entries).await?;
        }
        Ok(())
    }
}
