//! Test helpers for command integration tests.

use shibespace::state::AppState;

use client_core::config::ClientConfig;
use client_core::session::{ManualClock, MemoryStorage};

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::MockServer;

pub const ALICE_ID: &str = "0b7e4a3c-1d2f-4e5a-8b6c-7d8e9f0a1b2c";
pub const BOB_ID: &str = "9c8b7a6d-5e4f-4a3b-9c2d-1e0f9a8b7c6d";

pub struct TestApp {
    pub state: AppState,
    pub storage: Arc<MemoryStorage>,
    pub clock: Arc<ManualClock>,
}

/// App state pointed at `server`, with in-memory storage and a manual clock.
pub fn app_for(server: &MockServer) -> TestApp {
    let mut config = ClientConfig::default();
    config.api.base_url = server.uri();
    config.api.retry_max_elapsed_ms = 0;

    let storage = Arc::new(MemoryStorage::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let state = AppState::with_parts(config, storage.clone(), clock.clone())
        .expect("Failed to build app state");

    TestApp {
        state,
        storage,
        clock,
    }
}

pub fn thread_json(id: i32, creator_id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("thread {id}"),
        "content": "body",
        "tags": [],
        "creator_id": creator_id,
        "created_timestamp": "2024-05-01T10:00:00Z",
        "updated_timestamp": "2024-05-01T10:00:00Z",
    })
}

pub fn comment_json(id: i32, thread_id: i32, creator_id: &str) -> Value {
    json!({
        "id": id,
        "content": format!("comment {id}"),
        "thread_id": thread_id,
        "creator_id": creator_id,
        "created_timestamp": "2024-05-01T10:00:00Z",
        "updated_timestamp": "2024-05-01T10:00:00Z",
    })
}

pub fn user_json(id: &str, username: &str) -> Value {
    json!({ "id": id, "username": username })
}
