//! String key-value storage port plus the two implementations shopcombo ships.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// Minimal get/set storage keyed by string, values are opaque strings.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when nothing is stored under `key`.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-local store, used in tests and when no data directory is wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One file per key: `{dir}/{key}.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_err = |path: &Path, source: std::io::Error| StoreError::Io {
            path: path.display().to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_err(&self.dir, e))?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| io_err(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_err(&path, e))?;

        tracing::debug!(key, path = %path.display(), bytes = value.len(), "stored item");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips_values() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("last-combo").await.unwrap(), None);
        store.set_item("last-combo", "{}").await.unwrap();
        assert_eq!(
            store.get_item("last-combo").await.unwrap().as_deref(),
            Some("{}")
        );
    }

    #[tokio::test]
    async fn file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get_item("saved-combos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_writes_json_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        store.set_item("saved-combos", "[]").await.unwrap();
        store.set_item("saved-combos", "[1]").await.unwrap();

        let on_disk = std::fs::read_to_string(dir.path().join("nested/saved-combos.json")).unwrap();
        assert_eq!(on_disk, "[1]");
        assert!(!dir.path().join("nested/saved-combos.json.tmp").exists());
        assert_eq!(
            store.get_item("saved-combos").await.unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[tokio::test]
    async fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        for key in ["../escape", "a/b", "", "dot.ted"] {
            let err = store.set_item(key, "x").await.unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey(_)), "key {key:?}");
        }
    }
}
