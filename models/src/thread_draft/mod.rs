pub mod builder;

use serde::{Deserialize, Serialize};

/// Body of `POST /threads`.
///
/// Construct through [`builder::ThreadDraftBuilder`] so the API limits are
/// checked before the request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}
