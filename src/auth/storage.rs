//! Credential storage backends.
//!
//! Token data is persisted through the [`CredentialStore`] trait so that
//! applications can keep it wherever they like (a keychain, a database, a
//! browser-side store behind an FFI boundary). [`MemoryStore`] is the default
//! and keeps everything for the lifetime of the process.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

/// Error reported by a [`CredentialStore`] backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Credential storage error: {message}")]
pub struct StorageError {
    /// Backend-specific description.
    pub message: String,
}

impl StorageError {
    /// Creates a storage error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Async key/value storage for credential data.
#[async_trait]
pub trait CredentialStore: fmt::Debug + Send + Sync {
    /// Returns the value stored under `key`, or `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Stores `value` under `key` and returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    async fn set(&self, key: &str, value: Value) -> Result<Value, StorageError>;
}

/// In-memory [`CredentialStore`].
///
/// # Example
///
/// ```rust
/// use assembla_api::auth::{CredentialStore, MemoryStore};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let store = MemoryStore::new();
/// store.set("key-name", json!("key-value")).await.unwrap();
/// assert_eq!(store.get("key-name").await.unwrap(), Some(json!("key-value")));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<Value, StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(value)
    }
}
