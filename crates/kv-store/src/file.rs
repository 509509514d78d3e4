use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::{KeyValueStore, Result};

/// Key-value store persisted as a single JSON object on disk.
///
/// The whole map is rewritten on every `put`/`delete`; entries are small and
/// writes infrequent, so this stays synchronous. Clones share the same
/// in-memory state and file path.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl FileKeyValueStore {
    /// Opens the store at `path`, loading any existing entries.
    ///
    /// A missing, unreadable, or malformed file starts the store empty; the
    /// file is recreated on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "discarding malformed store file");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Returns the path backing this store.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.remove(key);
        self.flush(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path().join("store.json"));
        assert!(store.get("cart").unwrap().is_none());
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileKeyValueStore::open(&path);
        store.put("cart", r#"[{"id":1}]"#).unwrap();
        drop(store);

        let reopened = FileKeyValueStore::open(&path);
        assert_eq!(
            reopened.get("cart").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[test]
    fn malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileKeyValueStore::open(&path);
        assert!(store.get("cart").unwrap().is_none());
    }

    #[test]
    fn delete_is_written_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileKeyValueStore::open(&path);
        store.put("cart", "[]").unwrap();
        store.delete("cart").unwrap();
        drop(store);

        let reopened = FileKeyValueStore::open(&path);
        assert!(reopened.get("cart").unwrap().is_none());
    }

    #[test]
    fn open_creates_missing_parent_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileKeyValueStore::open(&path);
        store.put("cart", "[]").unwrap();
        assert!(path.exists());
    }
}
