//! Single-file JSON key/value store.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use quizdeck_core::error::StoreError;
use quizdeck_core::store::KeyValueStore;

/// Default location of the store file: `~/.local/share/quizdeck/storage.json`,
/// or `./quizdeck-storage.json` when `HOME` is unset.
pub fn default_store_path() -> PathBuf {
    std::env::var("HOME")
        .ok()
        .map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join("quizdeck")
                .join("storage.json")
        })
        .unwrap_or_else(|| PathBuf::from("quizdeck-storage.json"))
}

/// A key/value store persisted as one JSON object.
///
/// The file is read once on open. Every write replaces the whole file
/// through a temporary file in the same directory, so a crash mid-write
/// leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str::<BTreeMap<String, String>>(&content).map_err(
                |e| StoreError::Corrupt {
                    path: path.display().to_string(),
                    message: e.to_string(),
                },
            )?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), keys = items.len(), "opened storage");
        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keys currently stored, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    fn flush(&self) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let json = serde_json::to_string_pretty(&self.items).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value);
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<bool, StoreError> {
        if self.items.remove(key).is_none() {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }
}
