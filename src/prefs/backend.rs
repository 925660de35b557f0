//! Storage backends for preference records

use super::{UserKey, UserPreferences};
use crate::error::StorageError;
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;

type Records = HashMap<String, UserPreferences>;

/// Key-value storage for preference records
pub trait PreferenceBackend: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &str;

    /// Read the record for a key, if one was ever stored
    fn load(&self, key: &UserKey) -> Result<Option<UserPreferences>, StorageError>;

    /// Write the record for a key
    fn store(&self, key: &UserKey, prefs: &UserPreferences) -> Result<(), StorageError>;
}

/// Records kept in process memory only
#[derive(Default)]
pub struct MemoryBackend {
    records: RwLock<Records>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceBackend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self, key: &UserKey) -> Result<Option<UserPreferences>, StorageError> {
        let records = self.records.read().map_err(|_| StorageError::Poisoned)?;
        Ok(records.get(key.as_str()).cloned())
    }

    fn store(&self, key: &UserKey, prefs: &UserPreferences) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(|_| StorageError::Poisoned)?;
        records.insert(key.as_str().to_string(), prefs.clone());
        Ok(())
    }
}

/// All records in one pretty-printed JSON file, rewritten on every store
pub struct JsonFileBackend {
    path: PathBuf,
    records: RwLock<Records>,
}

impl JsonFileBackend {
    /// Open a preferences file. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match read_records(&path) {
            Ok(records) => records,
            Err(StorageError::Io(e)) if e.kind() == ErrorKind::NotFound => Records::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable preferences file");
                Records::new()
            }
        };
        tracing::debug!(path = %path.display(), users = records.len(), "opened preferences file");

        Self {
            path,
            records: RwLock::new(records),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, records: &Records) -> Result<(), StorageError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let temp_file = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.flush()?;
        }
        temp_file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn read_records(path: &Path) -> Result<Records, StorageError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

impl PreferenceBackend for JsonFileBackend {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self, key: &UserKey) -> Result<Option<UserPreferences>, StorageError> {
        let records = self.records.read().map_err(|_| StorageError::Poisoned)?;
        Ok(records.get(key.as_str()).cloned())
    }

    /// The in-memory copy is updated even when the file write fails
    fn store(&self, key: &UserKey, prefs: &UserPreferences) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(|_| StorageError::Poisoned)?;
        records.insert(key.as_str().to_string(), prefs.clone());
        self.flush(&records)
    }
}
