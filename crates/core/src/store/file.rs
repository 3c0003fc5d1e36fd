//! JSON file store, the local persistent cache.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::StoreError;
use super::RecordStore;
use crate::budget::BudgetLineItem;

/// Stores the record set as a pretty-printed JSON array in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn name(&self) -> &'static str {
        "local"
    }

    fn load(&self) -> Result<Vec<BudgetLineItem>, StoreError> {
        read_json(&self.path).map(Option::unwrap_or_default)
    }

    fn save(&self, records: &[BudgetLineItem]) -> Result<(), StoreError> {
        write_json(&self.path, records)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "records saved");
        Ok(())
    }
}

/// Reads and decodes a JSON file; `None` when the file does not exist.
pub(super) fn read_json<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<Option<T>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StoreError::io(path, err)),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Encodes `value` and replaces `path` with it, creating parent directories.
pub(super) fn write_json<T: serde::Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
    }
    let payload = serde_json::to_string_pretty(value)?;

    // Write beside the target and rename so readers never see a torn file.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, payload).map_err(|err| StoreError::io(&tmp, err))?;
    fs::rename(&tmp, path).map_err(|err| StoreError::io(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::fixtures::valid_item;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("rkas-file-store-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = JsonFileStore::new(temp_path("records.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("records.json");
        let store = JsonFileStore::new(&path);
        let records = vec![valid_item(), valid_item()];

        store.save(&records).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(store.load().unwrap(), records);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let path = temp_path("records.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
