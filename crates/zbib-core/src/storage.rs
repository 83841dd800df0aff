//! Key/value persistence for item snapshots
//!
//! The bibliography persists its raw items as one JSON snapshot under a
//! prefixed key. The backend is anything implementing [`ItemStorage`];
//! [`MemoryStorage`] ships as the in-process implementation.

use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use zbib_domain::CatalogItem;

/// A storage backend failed to read or write
#[derive(Debug, Clone, Error)]
#[error("storage backend failure: {0}")]
pub struct StorageError(pub String);

/// The contract a persistence backend implements.
///
/// Mirrors web localStorage: string keys, string values, no iteration.
pub trait ItemStorage: Send + Sync {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError>;
}

/// In-memory storage backend.
///
/// Clones share the same underlying map, so a caller can keep a handle
/// to inspect what the bibliography persisted.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStorage for MemoryStorage {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError("storage mutex poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError("storage mutex poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Namespaced wrapper around a storage backend.
///
/// The only logic here is key naming (`<prefix>-items`) and JSON
/// (de)serialization of the snapshot.
pub struct StorageAdapter {
    backend: Box<dyn ItemStorage>,
    prefix: String,
}

impl StorageAdapter {
    pub fn new(backend: Box<dyn ItemStorage>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    fn items_key(&self) -> String {
        format!("{}-items", self.prefix)
    }

    /// Load the persisted snapshot, if any
    pub fn load_items(&self) -> Result<Option<Vec<CatalogItem>>> {
        match self.backend.get(&self.items_key())? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Write the full snapshot
    pub fn save_items(&self, items: &[CatalogItem]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.backend.set(&self.items_key(), &raw)?;
        tracing::debug!(key = %self.items_key(), count = items.len(), "persisted item snapshot");
        Ok(())
    }
}
