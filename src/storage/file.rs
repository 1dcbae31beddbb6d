use super::{Storage, StorageError};
use serde_json::{Map, Value};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Persistent store backed by a single JSON object on disk, the equivalent of
/// `localStorage`.
///
/// The file is re-read on every call and rewritten on every mutation, so other
/// processes pointed at the same path observe each write immediately. A missing
/// file is an empty store.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    fn write(&self, items: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, raw)?;

        debug!("storage written: {}", self.path.display());

        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            // Hand-edited files may hold raw JSON instead of a string.
            other => other.to_string(),
        }))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read()?;
        items.insert(key.to_string(), Value::String(value.to_string()));
        self.write(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.read()?;
        if items.remove(key).is_some() {
            self.write(&items)?;
        }
        Ok(())
    }
}
