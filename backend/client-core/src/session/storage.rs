//! Key/value storage port backing the session record.
//!
//! Two implementations:
//! - [`MemoryStorage`]: process-local map, used by tests and one-shot runs
//! - [`FileStorage`]: one JSON object on disk, rewritten atomically on every change

use crate::error::storage::StorageError;

use common::ErrorLocation;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};

const STORAGE_FILE_NAME: &str = "local_storage.json";
const CORRUPT_SUFFIX: &str = ".corrupt";

/// Synchronous string storage, shaped like browser local storage.
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::lock(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::lock(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::lock(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Storage persisted as `{dir}/local_storage.json`.
///
/// The mutex serializes read-modify-write cycles within this process. Other
/// processes sharing the file are not coordinated with.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE_NAME)
    }

    #[track_caller]
    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let path = self.path();

        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| StorageError::Read {
            location: ErrorLocation::caller(),
            path: path.clone(),
            source: e,
        })?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| StorageError::Corrupted {
            location: ErrorLocation::caller(),
            path,
            reason: e.to_string(),
        })
    }

    /// Temp file + rename so a crash never leaves a half-written file.
    #[track_caller]
    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        ensure_dir(&self.dir)?;

        let path = self.path();
        let temp_path = self.dir.join(format!("{STORAGE_FILE_NAME}.tmp"));

        let json = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Corrupted {
            location: ErrorLocation::caller(),
            path: path.clone(),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| StorageError::Write {
            location: ErrorLocation::caller(),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &path).map_err(|e| StorageError::Write {
            location: ErrorLocation::caller(),
            path: path.clone(),
            source: e,
        })?;

        debug!("Storage written to {}", path.display());
        Ok(())
    }

    fn modify(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StorageError::lock(e.to_string()))?;

        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StorageError::Corrupted { path, reason, .. }) => {
                warn!("Discarding corrupted storage {}: {reason}", path.display());
                set_aside(&path);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        if change(&mut entries) {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|entries| entries.remove(key).is_some())
    }
}

#[track_caller]
fn ensure_dir(dir: &Path) -> Result<(), StorageError> {
    std::fs::create_dir_all(dir).map_err(|e| StorageError::Write {
        location: ErrorLocation::caller(),
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Keep an unreadable file next to the fresh one as `local_storage.json.corrupt`.
fn set_aside(path: &Path) {
    let mut aside = path.as_os_str().to_owned();
    aside.push(CORRUPT_SUFFIX);

    if let Err(e) = std::fs::rename(path, &aside) {
        warn!("Failed to move corrupted storage aside: {e}");
    }
}
