pub mod auth;
pub mod comments;
pub mod threads;

use client_core::ShibespaceClient;

use log::warn;
use uuid::Uuid;

const UNKNOWN_AUTHOR: &str = "[unknown]";

/// Username for `creator_id`; lookups that fail degrade to a placeholder.
pub(crate) async fn author_of(client: &ShibespaceClient, creator_id: Uuid) -> String {
    match client.resolve_username(creator_id).await {
        Ok(username) => username,
        Err(e) => {
            warn!("Failed to resolve author {creator_id}: {e}");
            String::from(UNKNOWN_AUTHOR)
        }
    }
}
