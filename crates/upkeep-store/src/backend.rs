//! # Persistence Backends
//!
//! A backend maps a collection key (`properties`, `personnel`,
//! `workOrders`) to the serialized text of that whole collection. Stores
//! never write partial collections; a backend only ever sees complete
//! values.
//!
//! - [`MemoryBackend`] keeps text in a shared map. It stands in for browser
//!   storage and is what tests and the in-memory workspace use.
//! - [`FileBackend`] keeps one `<key>.json` file per collection in a data
//!   directory. Writes go to a sibling temp file that is then renamed over
//!   the target, so a crash mid-write leaves the previous value intact.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use upkeep_core::UpkeepError;

/// Key-value persistence for whole collections.
///
/// An absent key is not an error: `load` returns `Ok(None)` and the store
/// treats it as an empty collection.
pub trait CollectionBackend: Send + Sync + fmt::Debug {
    /// Read the serialized collection stored under `key`.
    fn load(&self, key: &str) -> Result<Option<String>, UpkeepError>;

    /// Replace the value under `key`.
    fn save(&self, key: &str, contents: &str) -> Result<(), UpkeepError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), UpkeepError>;
}

// ─── In-memory ───────────────────────────────────────────────────────

/// In-process backend. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `key` with raw text, bypassing any store.
    pub fn insert(&self, key: impl Into<String>, contents: impl Into<String>) {
        self.entries.write().insert(key.into(), contents.into());
    }

    /// The raw text under `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }
}

impl CollectionBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, UpkeepError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), UpkeepError> {
        self.insert(key, contents);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), UpkeepError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

// ─── File system ─────────────────────────────────────────────────────

/// One JSON file per collection under a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open `dir`, creating it if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, UpkeepError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            UpkeepError::Storage(format!(
                "failed to create data directory {}: {e}",
                dir.display()
            ))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a collection key is stored in.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CollectionBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>, UpkeepError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(UpkeepError::Storage(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), UpkeepError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|e| {
            UpkeepError::Storage(format!("failed to write temp file {}: {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            UpkeepError::Storage(format!("failed to replace {}: {e}", path.display()))
        })
    }

    fn remove(&self, key: &str) -> Result<(), UpkeepError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(UpkeepError::Storage(format!(
                "failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_absent_key_is_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.load("properties").unwrap(), None);
    }

    #[test]
    fn test_memory_clones_share_state() {
        let a = MemoryBackend::new();
        let b = a.clone();
        a.save("workOrders", "[]").unwrap();
        assert_eq!(b.load("workOrders").unwrap().as_deref(), Some("[]"));
        b.remove("workOrders").unwrap();
        assert!(!a.contains("workOrders"));
    }

    #[test]
    fn test_file_roundtrip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path().join("data")).unwrap();
        assert_eq!(backend.load("personnel").unwrap(), None);

        backend.save("personnel", "[1,2]").unwrap();
        assert_eq!(backend.load("personnel").unwrap().as_deref(), Some("[1,2]"));
        assert!(backend.path_for("personnel").exists());
        assert!(!backend.path_for("personnel").with_extension("json.tmp").exists());

        backend.remove("personnel").unwrap();
        backend.remove("personnel").unwrap();
        assert_eq!(backend.load("personnel").unwrap(), None);
    }

    #[test]
    fn test_file_save_replaces_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        backend.save("properties", "[\"old\"]").unwrap();
        backend.save("properties", "[\"new\"]").unwrap();
        assert_eq!(
            backend.load("properties").unwrap().as_deref(),
            Some("[\"new\"]")
        );
    }
}
