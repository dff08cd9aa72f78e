//! Persistence traits for Encore

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Asynchronous string key-value store
///
/// This trait abstracts the device-local persistence every Encore feature
/// writes to (playlist history, theme, session flag, profile draft).
/// Values are opaque strings; callers own the serialization format.
///
/// Implementations may fail on any call. Callers decide whether a failure
/// is fatal; most Encore components log it and continue in memory.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`, or `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` (no error if it was absent)
    async fn remove(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key).await
    }
}
