use client_core::error::{
    ApiClientError, ConfigError, CoreError, SessionError, StorageError, ValidationError,
};
use common::ErrorLocation;

use serde::Serialize;
use thiserror::Error;

const GENERIC_USER_MESSAGE: &str = client_core::error::api_client::GENERIC_USER_MESSAGE;

/// Errors surfaced by CLI commands.
///
/// Printed as a short message for people, or serialized with `--json`; the
/// location is kept for the log file.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ShibespaceError {
    /// Error from this app
    #[error("Shibespace Error: {message} {location}")]
    Shibespace {
        message: String,
        location: ErrorLocation,
    },

    /// Error from client-core (API, session, storage, config, validation)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        user_message: String,
        location: ErrorLocation,
    },

    /// The command needs a session and none is believed valid
    #[error("Not Logged In Error: {message} {location}")]
    NotLoggedIn {
        message: String,
        location: ErrorLocation,
    },

    /// The tracked user does not appear to own the resource
    #[error("Not Owner Error: {message} {location}")]
    NotOwner {
        message: String,
        location: ErrorLocation,
    },
}

impl ShibespaceError {
    #[track_caller]
    pub fn app(message: impl Into<String>) -> Self {
        ShibespaceError::Shibespace {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn not_logged_in() -> Self {
        ShibespaceError::NotLoggedIn {
            message: String::from("You must be logged in to do that"),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn not_owner(what: &str) -> Self {
        ShibespaceError::NotOwner {
            message: format!("Only the creator can change this {what}"),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    fn core(error: impl std::fmt::Display, user_message: String) -> Self {
        ShibespaceError::Core {
            message: error.to_string(),
            user_message,
            location: ErrorLocation::caller(),
        }
    }

    /// Message to print on the terminal.
    pub fn user_message(&self) -> String {
        match self {
            ShibespaceError::Shibespace { .. } => String::from(GENERIC_USER_MESSAGE),
            ShibespaceError::Core { user_message, .. } => user_message.clone(),
            ShibespaceError::NotLoggedIn { message, .. }
            | ShibespaceError::NotOwner { message, .. } => message.clone(),
        }
    }
}

impl From<ApiClientError> for ShibespaceError {
    #[track_caller]
    fn from(error: ApiClientError) -> Self {
        let user_message = error.user_message();
        Self::core(error, user_message)
    }
}

impl From<ValidationError> for ShibespaceError {
    #[track_caller]
    fn from(error: ValidationError) -> Self {
        let user_message = error.user_message();
        Self::core(error, user_message)
    }
}

impl From<SessionError> for ShibespaceError {
    #[track_caller]
    fn from(error: SessionError) -> Self {
        Self::core(error, String::from(GENERIC_USER_MESSAGE))
    }
}

impl From<StorageError> for ShibespaceError {
    #[track_caller]
    fn from(error: StorageError) -> Self {
        Self::core(error, String::from(GENERIC_USER_MESSAGE))
    }
}

impl From<ConfigError> for ShibespaceError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        let user_message = match &error {
            ConfigError::ParseError { path, reason, .. } => {
                format!("Invalid configuration in {}: {reason}", path.display())
            }
            ConfigError::ValidationError { reason, .. } => format!("Invalid configuration: {reason}"),
            ConfigError::DirectoryNotFound { .. } => {
                String::from("Could not determine the configuration directory")
            }
            _ => String::from(GENERIC_USER_MESSAGE),
        };
        Self::core(error, user_message)
    }
}

impl From<CoreError> for ShibespaceError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::ApiClient(e) => ShibespaceError::from(e),
            CoreError::Validation(e) => ShibespaceError::from(e),
            CoreError::Session(e) => ShibespaceError::from(e),
            CoreError::Storage(e) => ShibespaceError::from(e),
            CoreError::Config(e) => ShibespaceError::from(e),
        }
    }
}
