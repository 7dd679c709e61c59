//! Error types for the forum REST client.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - `is_retryable()` uses status codes and transport flags, not message content
//! - Responses the UI reacts to (bad credentials, taken username, missing
//!   permission) get their own variants; everything else collapses into a
//!   generic user message

use crate::error::validation::ValidationError;

use common::{ErrorLocation, HttpStatusCode};
use models::ErrorResponse;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Shown for anything the client has no specific wording for.
pub const GENERIC_USER_MESSAGE: &str = "Something went wrong, please try again later";

#[derive(Debug, ThisError)]
pub enum ApiClientError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid Credentials Error: the username or password is incorrect {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Username Taken Error: {username} {location}")]
    UsernameTaken {
        username: String,
        location: ErrorLocation,
    },

    #[error("Unauthorized Error: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Not Found Error: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Bad Request Error: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status_code} - {message} {location}")]
    Server {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<url::ParseError> for ApiClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ApiClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        // Decode failures surface through reqwest when using Response::json
        if error.is_decode() {
            return ApiClientError::Json {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        ApiClientError::Http {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ApiClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiClientError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl ApiClientError {
    /// Classify a non-2xx response.
    ///
    /// The body is expected to be `{"error": "..."}`; anything else is kept verbatim.
    #[track_caller]
    pub fn from_http_response(status_code: u16, body: &str) -> Self {
        let status = HttpStatusCode(status_code);
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|response| response.error)
            .unwrap_or_else(|_| body.trim().to_string());
        let location = ErrorLocation::from(Location::caller());

        match status {
            HttpStatusCode::BAD_REQUEST => ApiClientError::BadRequest { message, location },
            HttpStatusCode::UNAUTHORIZED => ApiClientError::Unauthorized { message, location },
            HttpStatusCode::NOT_FOUND => ApiClientError::NotFound { message, location },
            _ => ApiClientError::Server {
                status_code: status,
                message,
                location,
            },
        }
    }

    #[track_caller]
    pub fn invalid_credentials() -> Self {
        ApiClientError::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn username_taken(username: impl Into<String>) -> Self {
        ApiClientError::UsernameTaken {
            username: username.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Check if this error is retryable based on error category, NOT string content.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiClientError::Http {
                is_timeout,
                is_connection,
                ..
            } => *is_timeout || *is_connection,
            ApiClientError::Server { status_code, .. } => status_code.is_retryable(),
            ApiClientError::Json { .. }
            | ApiClientError::UrlParse { .. }
            | ApiClientError::InvalidCredentials { .. }
            | ApiClientError::UsernameTaken { .. }
            | ApiClientError::Unauthorized { .. }
            | ApiClientError::NotFound { .. }
            | ApiClientError::BadRequest { .. }
            | ApiClientError::Validation(_) => false,
        }
    }

    /// Get HTTP status code if the error came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiClientError::InvalidCredentials { .. } | ApiClientError::Unauthorized { .. } => {
                Some(HttpStatusCode::UNAUTHORIZED.0)
            }
            ApiClientError::UsernameTaken { .. } => Some(HttpStatusCode::CONFLICT.0),
            ApiClientError::NotFound { .. } => Some(HttpStatusCode::NOT_FOUND.0),
            ApiClientError::BadRequest { .. } => Some(HttpStatusCode::BAD_REQUEST.0),
            ApiClientError::Server { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// Message suitable for showing to the person using the client.
    pub fn user_message(&self) -> String {
        match self {
            ApiClientError::InvalidCredentials { .. } => {
                String::from("The username or password is incorrect")
            }
            ApiClientError::UsernameTaken { .. } => String::from("Username is already taken"),
            ApiClientError::Unauthorized { .. } => {
                String::from("You must be logged in as the owner to do that")
            }
            ApiClientError::NotFound { message, .. } if !message.is_empty() => message.clone(),
            ApiClientError::Validation(error) => error.user_message(),
            _ => String::from(GENERIC_USER_MESSAGE),
        }
    }
}
