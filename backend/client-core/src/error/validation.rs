//! Error types for client-side input validation.
//!
//! Checks run before a request is sent so that obviously invalid input is
//! reported with a precise message instead of a round trip and a 400.

use common::ErrorLocation;

use std::fmt;

use thiserror::Error as ThisError;

/// Field-level validation failure.
#[derive(Debug, ThisError)]
pub enum ValidationError {
    #[error("Validation failed for '{field}': {reason} {location}")]
    Field {
        field: &'static str,
        reason: ValidationFailure,
        location: ErrorLocation,
    },
}

/// Specific reasons for a validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
    InvalidCharacters,
    TooMany { max: usize },
    Duplicate { value: String },
    OutOfRange { min: u32, actual: u32 },
    Rejected { message: String },
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min, actual } => {
                write!(f, "too short ({} chars, minimum {})", actual, min)
            }
            Self::TooLong { max, actual } => {
                write!(f, "too long ({} chars, maximum {})", actual, max)
            }
            Self::InvalidCharacters => write!(f, "contains invalid characters"),
            Self::TooMany { max } => write!(f, "more than {} entries", max),
            Self::Duplicate { value } => write!(f, "'{}' is already present", value),
            Self::OutOfRange { min, actual } => {
                write!(f, "value {} is below minimum {}", actual, min)
            }
            Self::Rejected { message } => write!(f, "{}", message),
        }
    }
}

impl ValidationError {
    #[track_caller]
    pub fn field(field: &'static str, reason: ValidationFailure) -> Self {
        ValidationError::Field {
            field,
            reason,
            location: ErrorLocation::caller(),
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            ValidationError::Field { field, .. } => field,
        }
    }

    pub fn reason(&self) -> &ValidationFailure {
        match self {
            ValidationError::Field { reason, .. } => reason,
        }
    }

    /// Message suitable for showing next to the offending input.
    pub fn user_message(&self) -> String {
        let ValidationError::Field { field, reason, .. } = self;

        match (*field, reason) {
            ("username", ValidationFailure::InvalidCharacters) => String::from(
                "Username can only contain letters, numbers, underscores, and hyphens",
            ),
            ("username", _) => String::from("Username must be between 3 and 20 characters long"),
            ("password", _) => String::from("Password must be at least 8 characters long"),
            ("title", _) => String::from("Title must be between 1 and 255 characters long"),
            ("content", _) => String::from("Content must be at least 1 character long"),
            ("tag", ValidationFailure::Duplicate { .. }) => {
                String::from("Tag is already being filtered")
            }
            ("tag", ValidationFailure::TooMany { max }) => {
                format!("There cannot be more than {max} tags")
            }
            ("tag", _) => String::from("Tag must be between 1 and 35 characters long"),
            ("page", _) => String::from("Page must be at least 1"),
            (field, reason) => format!("Invalid {field}: {reason}"),
        }
    }
}
