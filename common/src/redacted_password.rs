//! Password handling with redacted Debug output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// A password that never exposes its value in logs or debug output.
#[derive(Clone)]
pub struct RedactedPassword {
    inner: String,
}

impl RedactedPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            inner: password.into(),
        }
    }

    /// Get the actual password for transmission.
    ///
    /// # Security Note
    /// Only call this when building the request body for the API.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Length in characters (safe to log, used by validation).
    #[inline]
    pub fn char_count(&self) -> usize {
        self.inner.chars().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for RedactedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedPassword([REDACTED])")
    }
}

impl fmt::Display for RedactedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED PASSWORD]")
    }
}

impl Drop for RedactedPassword {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Request bodies must call as_str() explicitly
impl serde::Serialize for RedactedPassword {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from(
                "RedactedPassword cannot be serialized - use as_str() explicitly",
            ),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
