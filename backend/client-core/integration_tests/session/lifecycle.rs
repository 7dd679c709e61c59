use client_core::session::{
    LocalStorage, ManualClock, MemoryStorage, SESSION_STORAGE_KEY, SessionSettings,
    SessionTracker,
};

use models::SessionRecord;

use std::sync::Arc;

fn store_record(storage: &MemoryStorage, username: &str, expiry: i64) {
    let record = SessionRecord {
        username: username.to_string(),
        expires_at_epoch_ms: expiry,
    };
    storage
        .set(SESSION_STORAGE_KEY, &serde_json::to_string(&record).unwrap())
        .unwrap();
}

fn start_at(storage: Arc<MemoryStorage>, now: i64) -> SessionTracker {
    SessionTracker::start(
        storage,
        Arc::new(ManualClock::new(now)),
        SessionSettings::default(),
    )
}

// ============================================================================
// Initial check
// ============================================================================

#[tokio::test]
async fn given_no_record_when_started_then_username_none_and_no_poll() {
    let tracker = start_at(Arc::new(MemoryStorage::new()), 0);

    assert_eq!(tracker.current_username(), None);
    assert!(!tracker.is_polling());
}

/// **VALUE**: Verifies a valid record from a previous run is picked up on start.
///
/// **WHY THIS MATTERS**: Restarting the client within the hour must not look like a
/// logout while the cookie is still valid.
#[tokio::test]
async fn given_valid_record_when_started_then_username_exposed_and_polling() {
    let storage = Arc::new(MemoryStorage::new());
    store_record(&storage, "alice", 10_000);

    let tracker = start_at(storage, 9_999);

    assert_eq!(tracker.current_username().as_deref(), Some("alice"));
    assert!(tracker.is_polling());
}

/// **VALUE**: Verifies a record expiring exactly now counts as expired.
///
/// **BUG THIS CATCHES**: Would catch `<=` sneaking into the validity comparison.
#[tokio::test]
async fn given_record_expiring_now_when_started_then_expired_and_removed() {
    let storage = Arc::new(MemoryStorage::new());
    store_record(&storage, "alice", 10_000);

    let tracker = start_at(storage.clone(), 10_000);

    assert_eq!(tracker.current_username(), None);
    assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);
}

/// **VALUE**: Verifies malformed JSON is treated as logged out without panicking.
///
/// **WHY THIS MATTERS**: Storage is user-editable and may hold anything.
///
/// **BUG THIS CATCHES**: Would catch an `unwrap()` on the decode path.
#[tokio::test]
async fn given_malformed_record_when_started_then_logged_out_and_left_in_place() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(SESSION_STORAGE_KEY, "{not json").unwrap();

    let tracker = start_at(storage.clone(), 0);

    assert_eq!(tracker.current_username(), None);
    assert_eq!(
        storage.get(SESSION_STORAGE_KEY).unwrap().as_deref(),
        Some("{not json")
    );
}

// ============================================================================
// Login, recheck, logout
// ============================================================================

/// **VALUE**: Verifies the login flow (record, then recheck) exposes the username.
#[tokio::test]
async fn given_login_when_rechecked_then_username_exposed() {
    let tracker = start_at(Arc::new(MemoryStorage::new()), 0);

    tracker.record_login("alice").unwrap();
    tracker.trigger_recheck();

    assert_eq!(tracker.current_username().as_deref(), Some("alice"));
}

/// **VALUE**: Verifies repeated rechecks do not change the outcome or stack poll tasks.
///
/// **BUG THIS CATCHES**: Would catch each recheck spawning another poll without
/// cancelling the previous one.
#[tokio::test]
async fn given_valid_session_when_rechecked_twice_then_same_username_single_poll() {
    let tracker = start_at(Arc::new(MemoryStorage::new()), 0);
    tracker.record_login("alice").unwrap();
    let mut rx = tracker.subscribe();

    tracker.trigger_recheck();
    let first = tracker.current_username();
    assert!(rx.has_changed().unwrap());
    rx.borrow_and_update();

    tracker.trigger_recheck();

    assert_eq!(tracker.current_username(), first);
    assert!(!rx.has_changed().unwrap());
    assert!(tracker.is_polling());
}

/// **VALUE**: Verifies a second login replaces the first record.
#[tokio::test]
async fn given_second_login_when_rechecked_then_latest_username_wins() {
    let storage = Arc::new(MemoryStorage::new());
    let tracker = start_at(storage.clone(), 0);

    tracker.record_login("alice").unwrap();
    tracker.record_login("bob").unwrap();
    tracker.trigger_recheck();

    assert_eq!(tracker.current_username().as_deref(), Some("bob"));
}

/// **VALUE**: Verifies logout clears storage and publishes `None` immediately.
///
/// **WHY THIS MATTERS**: Without an explicit clear, the client would show the user as
/// logged in for up to an hour after logging out.
///
/// **BUG THIS CATCHES**: Would catch logout only removing the record and waiting for
/// the next poll to notice.
#[tokio::test]
async fn given_logged_in_when_logging_out_then_cleared_and_not_polling() {
    let storage = Arc::new(MemoryStorage::new());
    let tracker = start_at(storage.clone(), 0);
    tracker.record_login("alice").unwrap();
    tracker.trigger_recheck();

    tracker.record_logout().unwrap();

    assert_eq!(tracker.current_username(), None);
    assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);
    assert!(!tracker.is_polling());
}

#[tokio::test]
async fn given_polling_tracker_when_shut_down_then_username_kept_and_poll_stopped() {
    let tracker = start_at(Arc::new(MemoryStorage::new()), 0);
    tracker.record_login("alice").unwrap();
    tracker.trigger_recheck();

    tracker.shutdown();

    assert_eq!(tracker.current_username().as_deref(), Some("alice"));
    assert!(!tracker.is_polling());
}
