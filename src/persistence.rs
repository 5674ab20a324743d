//! Snapshot storage backends.
//!
//! Every store is persisted as one JSON blob under a fixed key
//! ([`StoreState::STORAGE_KEY`](crate::framework::StoreState::STORAGE_KEY)).
//! Blobs are full snapshots; there is no migration or versioning.

use crate::framework::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// A key/value store for serialized snapshots.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Loads the blob stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the blob stored under `key`.
    async fn save(&self, key: &str, blob: &str) -> Result<(), StorageError>;
}

/// Stores each blob as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        // Readers never observe a partially written snapshot.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, blob).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(key, path = %path.display(), bytes = blob.len(), "Snapshot saved");
        Ok(())
    }
}

/// Keeps blobs in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn blobs(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs().get(key).cloned())
    }

    async fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        self.blobs().insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
