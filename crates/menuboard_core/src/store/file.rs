//! JSON-file backed key/value store.
//!
//! # Invariants
//! - The whole map is rewritten on every mutation (small preference sets).
//! - Reads are served from memory until `reload()` re-reads the file.
//! - A missing or corrupted file starts as empty storage; corruption is
//!   logged, never surfaced.

use super::KeyValueStore;
use log::{error, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading existing entries when readable.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = load_entries(&path);
        Self { path, entries }
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                error!(
                    "event=kv_write module=store status=error error_code=mkdir_failed path={} error={}",
                    parent.display(),
                    err
                );
                return;
            }
        }

        let body = match serde_json::to_string_pretty(&self.entries) {
            Ok(body) => body,
            Err(err) => {
                error!(
                    "event=kv_write module=store status=error error_code=encode_failed error={}",
                    err
                );
                return;
            }
        };

        if let Err(err) = std::fs::write(&self.path, body) {
            error!(
                "event=kv_write module=store status=error error_code=write_failed path={} error={}",
                self.path.display(),
                err
            );
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }

    fn reload(&mut self) {
        self.entries = load_entries(&self.path);
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(err) => {
            warn!(
                "event=kv_open module=store status=error error_code=read_failed path={} error={}",
                path.display(),
                err
            );
            return BTreeMap::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(
                "event=kv_open module=store status=error error_code=corrupted path={} error={}",
                path.display(),
                err
            );
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::JsonFileStore;
    use crate::store::KeyValueStore;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("client-storage.json");

        let mut store = JsonFileStore::open(&path);
        store.set("daypartOverride", "breakfast");
        store.set("dayOverride", "friday");
        store.remove("dayOverride");

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("daypartOverride").as_deref(), Some("breakfast"));
        assert_eq!(reopened.get("dayOverride"), None);
    }

    #[test]
    fn corrupted_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client-storage.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("daypartOverride"), None);
    }

    #[test]
    fn reload_sees_writes_from_another_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client-storage.json");
        let mut reader = JsonFileStore::open(&path);
        let mut writer = JsonFileStore::open(&path);

        writer.set("dayOverride", "friday");
        assert_eq!(reader.get("dayOverride"), None);
        reader.reload();
        assert_eq!(reader.get("dayOverride").as_deref(), Some("friday"));

        writer.remove("dayOverride");
        reader.reload();
        assert_eq!(reader.get("dayOverride"), None);
    }
}
