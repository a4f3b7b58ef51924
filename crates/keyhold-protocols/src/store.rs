//! Key-value storage protocol.
//!
//! Mirrors the browser's local extension storage: a flat map from string
//! keys to JSON values, read and written whole.

use async_trait::async_trait;

use crate::error::StoreError;

/// Core trait for storage backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the backend ID.
    fn id(&self) -> &str;

    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
