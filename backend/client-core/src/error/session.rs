use crate::error::storage::StorageError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Session Storage Error: {source} {location}")]
    Storage {
        location: ErrorLocation,
        #[source]
        source: StorageError,
    },

    #[error("Session Encode Error: {message} {location}")]
    Encode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session Username Error: username cannot be empty {location}")]
    EmptyUsername { location: ErrorLocation },
}

impl From<StorageError> for SessionError {
    #[track_caller]
    fn from(error: StorageError) -> Self {
        SessionError::Storage {
            location: ErrorLocation::from(Location::caller()),
            source: error,
        }
    }
}

impl From<serde_json::Error> for SessionError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        SessionError::Encode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
