use serde::{Deserialize, Serialize};

/// Body of every non-2xx response from the forum API.
///
/// 5xx responses always carry the same generic message; the details stay
/// in the server log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
