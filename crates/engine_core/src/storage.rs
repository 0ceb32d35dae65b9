//! Key-value persistence for data that survives between sessions.
//!
//! Values are opaque strings keyed by a fixed name. Callers own the encoding; the
//! store only moves blobs. `MemoryStore` backs tests and storage-less sessions,
//! `FileStore` writes one file per key under a directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage key {0:?} is not a valid file name")]
    InvalidKey(String),
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string blob store keyed by name.
pub trait KeyValueStore {
    /// Read the blob stored under `key`. `Ok(None)` means nothing was stored yet.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous blob.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the blob under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key exists.
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.data.remove(key);
        Ok(())
    }
}

/// Directory-backed store: each key is a `<key>.ron` file under `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            path: root.clone(),
            source,
        })?;
        log::debug!("File store opened at {:?}", root);
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.ron", key)))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_write_read_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read("save").unwrap(), None);

        store.write("save", "blob").unwrap();
        assert!(store.has("save"));
        assert_eq!(store.read("save").unwrap().as_deref(), Some("blob"));

        store.write("save", "newer").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.read("save").unwrap().as_deref(), Some("newer"));

        store.remove("save").unwrap();
        store.remove("save").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn file_store_round_trips_and_tolerates_missing_keys() {
        let dir = std::env::temp_dir().join(format!("engine_core_store_{}", std::process::id()));
        let mut store = FileStore::open(&dir).unwrap();

        assert_eq!(store.read("missing").unwrap(), None);
        store.write("progress", "(score: 10)").unwrap();
        assert_eq!(store.read("progress").unwrap().as_deref(), Some("(score: 10)"));
        store.remove("progress").unwrap();
        assert_eq!(store.read("progress").unwrap(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = std::env::temp_dir().join(format!("engine_core_keys_{}", std::process::id()));
        let mut store = FileStore::open(&dir).unwrap();
        assert!(matches!(
            store.write("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
