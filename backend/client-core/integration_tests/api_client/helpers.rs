//! Test helpers for REST client integration tests.
//!
//! - Building a client pointed at a wiremock server with fast retries
//! - Canned JSON for threads and comments

use client_core::{RetryPolicy, ShibespaceClient};

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::MockServer;

pub const CREATOR_ID: &str = "6f1c2a7e-2b0d-4f6b-9a51-3c1d4a2b7e90";

/// Client with short retry intervals so retry tests stay fast.
pub fn client_for(server: &MockServer) -> ShibespaceClient {
    ShibespaceClient::with_options(
        &server.uri(),
        Duration::from_secs(5),
        RetryPolicy {
            initial_interval: Duration::from_millis(5),
            max_elapsed: Duration::from_secs(2),
        },
    )
    .expect("Failed to build client")
}

pub fn thread_json(id: i32, title: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": format!("content of {title}"),
        "tags": tags,
        "creator_id": CREATOR_ID,
        "created_timestamp": "2024-05-01T10:00:00+00:00",
        "updated_timestamp": "2024-05-01T10:00:00+00:00",
    })
}

pub fn comment_json(id: i32, thread_id: i32, content: &str) -> Value {
    json!({
        "id": id,
        "content": content,
        "thread_id": thread_id,
        "creator_id": CREATOR_ID,
        "created_timestamp": "2024-05-01T10:00:00+02:00",
        "updated_timestamp": "2024-05-01T11:30:00+02:00",
    })
}
