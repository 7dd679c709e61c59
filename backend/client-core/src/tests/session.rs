// Unit tests for the session tracker that need no timers

use crate::error::session::SessionError;
use crate::error::storage::StorageError;
use crate::session::{
    LocalStorage, ManualClock, MemoryStorage, SESSION_STORAGE_KEY, SessionSettings,
    SessionTracker,
};

use models::SessionRecord;

use std::sync::Arc;

/// Storage whose every operation fails.
struct BrokenStorage;

impl LocalStorage for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::lock("poisoned"))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::lock("poisoned"))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::lock("poisoned"))
    }
}

fn tracker_at(storage: Arc<dyn LocalStorage>, now: i64) -> SessionTracker {
    SessionTracker::new(
        storage,
        Arc::new(ManualClock::new(now)),
        SessionSettings::default(),
    )
}

/// **VALUE**: Verifies `record_login` writes the record but does not publish it.
///
/// **WHY THIS MATTERS**: The login flow explicitly triggers a recheck afterwards.
/// Publishing early would let consumers observe a username the tracker has not
/// validated or started polling for.
///
/// **BUG THIS CATCHES**: Would catch `record_login` calling `trigger_recheck` itself.
#[test]
fn given_login_recorded_when_not_rechecked_then_username_still_none() {
    let storage = Arc::new(MemoryStorage::new());
    let tracker = tracker_at(storage.clone(), 1_000);

    let record = tracker.record_login("alice").unwrap();

    assert_eq!(record.expires_at_epoch_ms, 1_000 + 3_600_000);
    assert_eq!(tracker.current_username(), None);

    let stored = storage.get(SESSION_STORAGE_KEY).unwrap().unwrap();
    let decoded: SessionRecord = serde_json::from_str(&stored).unwrap();
    assert_eq!(decoded, record);
}

/// **VALUE**: Verifies the persisted JSON keeps the `expiry` field name.
///
/// **BUG THIS CATCHES**: Would catch a rename breaking records written by older clients.
#[test]
fn given_login_recorded_when_reading_raw_storage_then_uses_expiry_field() {
    let storage = Arc::new(MemoryStorage::new());
    let tracker = tracker_at(storage.clone(), 0);

    tracker.record_login("alice").unwrap();

    let raw = storage.get(SESSION_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["username"], "alice");
    assert_eq!(value["expiry"], 3_600_000);
}

#[test]
fn given_empty_username_when_recording_login_then_rejected() {
    let tracker = tracker_at(Arc::new(MemoryStorage::new()), 0);

    assert!(matches!(
        tracker.record_login(""),
        Err(SessionError::EmptyUsername { .. })
    ));
}

/// **VALUE**: Verifies write failures surface but read failures mean logged out.
///
/// **WHY THIS MATTERS**: A failed login write must be reported, while a broken store
/// on startup must never crash the client.
///
/// **BUG THIS CATCHES**: Would catch read errors propagating as panics.
#[test]
fn given_broken_storage_when_using_tracker_then_writes_fail_and_reads_log_out() {
    let tracker = tracker_at(Arc::new(BrokenStorage), 0);

    assert!(matches!(
        tracker.record_login("alice"),
        Err(SessionError::Storage { .. })
    ));

    tracker.trigger_recheck();
    assert_eq!(tracker.current_username(), None);
    assert!(!tracker.is_polling());
}

/// **VALUE**: Verifies an expired record found on a recheck is removed, even without
/// a runtime to poll on.
#[test]
fn given_expired_record_when_rechecking_without_runtime_then_removed() {
    let storage = Arc::new(MemoryStorage::new());
    let record = SessionRecord::new("alice", 0, 1_000);
    storage
        .set(SESSION_STORAGE_KEY, &serde_json::to_string(&record).unwrap())
        .unwrap();

    let tracker = tracker_at(storage.clone(), 1_000);
    tracker.trigger_recheck();

    assert_eq!(tracker.current_username(), None);
    assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);
}

/// **VALUE**: Verifies a valid record is exposed even when no runtime exists to poll.
#[test]
fn given_valid_record_when_rechecking_without_runtime_then_username_without_poll() {
    let storage = Arc::new(MemoryStorage::new());
    let tracker = tracker_at(storage, 0);

    tracker.record_login("alice").unwrap();
    tracker.trigger_recheck();

    assert_eq!(tracker.current_username().as_deref(), Some("alice"));
    assert!(!tracker.is_polling());
}
