//! Durable local string key-value storage.
//!
//! The vault persists exactly two entries — the master-key record and
//! the JSON vault document — into a small string key-value store. The
//! `KeyValueStore` trait is the seam: production code uses `FileStore`
//! (one JSON object file on disk), tests and embedders can use
//! `MemoryStore`.
//!
//! Read policy is lenient: a missing or malformed store reads as empty,
//! because "can't read" must surface as "no existing vault" rather than
//! a crash. Write failures are never masked.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// A persistent string-to-string map with last-write-wins semantics.
pub trait KeyValueStore {
    /// Look up a value. `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value. Failures propagate to the caller.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// File-backed store: all entries live in one JSON object file.
///
/// Every mutation rewrites the whole file atomically (temp file +
/// rename in the same directory), so readers never observe a
/// half-written store.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories if needed.
    ///
    /// A missing file or unparseable content yields an empty store; the
    /// first successful write replaces whatever was there.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let entries = match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => BTreeMap::new(),
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the map and write it to disk atomically.
    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| crate::errors::PocketVaultError::SerializationError(e.to_string()))?;

        // Atomic write: temp file in the same directory, then rename.
        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store for tests and embedding. Nothing survives drop.
#[derive(Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("alpha", "1").unwrap();
        store.set("beta", "2").unwrap();

        // Re-open and read back.
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("alpha").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("beta").unwrap().as_deref(), Some("2"));
        assert_eq!(reopened.get("gamma").unwrap(), None);
    }

    #[test]
    fn file_store_overwrites_existing_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("key", "old").unwrap();
        store.set("key", "new").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("key").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn file_store_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("key", "value").unwrap();
        store.remove("key").unwrap();
        // Removing again is a no-op.
        store.remove("key").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("key").unwrap(), None);
    }

    #[test]
    fn malformed_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not valid json {{").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("key", "value").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);
    }
}
