//! JSON-file backed key-value store.

use super::atomic::AtomicFileWriter;
use crate::host::KeyValueStore;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A [`KeyValueStore`] persisted as a flat JSON object.
///
/// The file is read once at open and rewritten atomically on every change.
/// A failed write is logged; the in-memory value is updated regardless.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, creating it lazily on first write.
    pub fn open(path: &Path) -> Result<Self> {
        let values = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read store file: {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse store file: {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            values: Mutex::new(values),
        })
    }

    /// Get the store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) {
        let result = AtomicFileWriter::new(&self.path).and_then(|w| w.write_json(values));
        if let Err(e) = result {
            tracing::warn!(target: "envswitch", "Failed to persist store {}: {:#}", self.path.display(), e);
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            if values.get(key).map(String::as_str) == Some(value) && self.path.exists() {
                return;
            }
            values.insert(key.to_string(), value.to_string());
            self.flush(&values);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            if values.remove(key).is_some() {
                self.flush(&values);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("storage.json");

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("apiSwitch"), None);
        assert!(!path.exists());

        store.set("apiSwitch", "test");
        assert!(path.exists());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("apiSwitch"), Some("test".to_string()));
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_remove_persists() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("storage.json");

        let store = FileStore::open(&path).unwrap();
        store.set("apiSwitch", "test");
        store.set("other", "value");
        store.remove("apiSwitch");

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("apiSwitch"), None);
        assert_eq!(reopened.get("other"), Some("value".to_string()));
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("apiSwitch"), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse store file"));
    }

    #[test]
    fn test_failed_write_keeps_memory_value() {
        let temp_dir = tempdir().unwrap();
        // The target is an existing directory, so the rename fails.
        let path = temp_dir.path().join("dir");
        fs::create_dir(&path).unwrap();

        let store = FileStore {
            path: path.clone(),
            values: Mutex::new(BTreeMap::new()),
        };
        store.set("apiSwitch", "test");
        assert_eq!(store.get("apiSwitch"), Some("test".to_string()));
    }
}
