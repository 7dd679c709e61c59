use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage Corrupted Error: {path}: {reason} {location}")]
    Corrupted {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Storage Lock Error: {message} {location}")]
    Lock {
        location: ErrorLocation,
        message: String,
    },
}

impl StorageError {
    #[track_caller]
    pub fn lock(message: impl Into<String>) -> Self {
        StorageError::Lock {
            location: ErrorLocation::caller(),
            message: message.into(),
        }
    }
}
