use serde::{Deserialize, Serialize};

/// Locally persisted record of who is logged in and until when.
///
/// Mirrors the lifetime of the httponly `jwt` cookie issued by the API.
/// It is advisory: holding one grants nothing, the cookie is what the
/// server checks.
///
/// Serialized as `{"username": "...", "expiry": <epoch millis>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub username: String,
    #[serde(rename = "expiry")]
    pub expires_at_epoch_ms: i64,
}

impl SessionRecord {
    pub fn new(username: impl Into<String>, created_at_epoch_ms: i64, validity_ms: i64) -> Self {
        Self {
            username: username.into(),
            expires_at_epoch_ms: created_at_epoch_ms.saturating_add(validity_ms),
        }
    }

    /// A record is valid strictly before its expiry instant.
    pub fn is_valid_at(&self, now_epoch_ms: i64) -> bool {
        now_epoch_ms < self.expires_at_epoch_ms
    }

    pub fn is_expired_at(&self, now_epoch_ms: i64) -> bool {
        !self.is_valid_at(now_epoch_ms)
    }
}
