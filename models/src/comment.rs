use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub thread_id: i32,
    pub creator_id: Uuid,
    pub created_timestamp: DateTime<Utc>,
    pub updated_timestamp: DateTime<Utc>,
}

impl Comment {
    pub fn was_edited(&self) -> bool {
        self.updated_timestamp > self.created_timestamp
    }
}
