use client_core::error::storage::StorageError;
use client_core::session::{
    FileStorage, LocalStorage, ManualClock, SESSION_STORAGE_KEY, SessionSettings, SessionTracker,
};

use std::sync::Arc;

use tempfile::TempDir;

/// **VALUE**: Verifies values survive into a fresh `FileStorage` on the same directory.
///
/// **WHY THIS MATTERS**: The CLI is a new process per command; the session record and
/// credential cookie must be read back by the next invocation.
#[test]
fn given_values_written_when_reopened_then_values_persist() {
    let dir = TempDir::new().unwrap();

    let storage = FileStorage::new(dir.path());
    storage.set("a", "1").unwrap();
    storage.set("b", "2").unwrap();
    storage.remove("a").unwrap();

    let reopened = FileStorage::new(dir.path());
    assert_eq!(reopened.get("a").unwrap(), None);
    assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
}

/// **VALUE**: Verifies the atomic write leaves no temp file behind.
#[test]
fn given_write_when_finished_then_only_storage_file_exists() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path().join("nested"));

    storage.set("key", "value").unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path().join("nested"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["local_storage.json".to_string()]);
}

#[test]
fn given_missing_or_empty_file_when_reading_then_none() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path());
    assert_eq!(storage.get("key").unwrap(), None);

    std::fs::write(storage.path(), "   ").unwrap();
    assert_eq!(storage.get("key").unwrap(), None);
}

/// **VALUE**: Verifies a corrupted file is reported, and the tracker treats it as logged out.
///
/// **BUG THIS CATCHES**: Would catch corruption either panicking or silently erasing
/// the file on read.
#[tokio::test]
async fn given_corrupted_file_when_tracker_starts_then_logged_out_and_file_untouched() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));
    std::fs::write(storage.path(), "[1, 2").unwrap();

    assert!(matches!(
        storage.get(SESSION_STORAGE_KEY),
        Err(StorageError::Corrupted { .. })
    ));

    let tracker = SessionTracker::start(
        storage.clone(),
        Arc::new(ManualClock::new(0)),
        SessionSettings::default(),
    );

    assert_eq!(tracker.current_username(), None);
    assert_eq!(std::fs::read_to_string(storage.path()).unwrap(), "[1, 2");
}

#[tokio::test]
async fn given_file_storage_when_logging_in_then_record_visible_to_new_tracker() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(1_000));

    let first = SessionTracker::start(
        Arc::new(FileStorage::new(dir.path())),
        clock.clone(),
        SessionSettings::default(),
    );
    first.record_login("alice").unwrap();
    drop(first);

    let second = SessionTracker::start(
        Arc::new(FileStorage::new(dir.path())),
        clock,
        SessionSettings::default(),
    );

    assert_eq!(second.current_username().as_deref(), Some("alice"));
}

/// **VALUE**: Verifies a login can still be recorded after the storage file was corrupted.
///
/// **WHY THIS MATTERS**: The tracker reports a corrupted file as logged out. If writes
/// kept failing on the same file, neither login nor logout could ever succeed again
/// without deleting it by hand.
///
/// **BUG THIS CATCHES**: Would catch `set`/`remove` propagating the parse failure
/// instead of starting over from an empty map.
#[tokio::test]
async fn given_corrupted_file_when_logging_in_then_record_written_and_bad_file_kept_aside() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));
    std::fs::write(storage.path(), "[1, 2").unwrap();

    let tracker = SessionTracker::start(
        storage.clone(),
        Arc::new(ManualClock::new(0)),
        SessionSettings::default(),
    );
    assert_eq!(tracker.current_username(), None);

    tracker.record_login("alice").unwrap();
    tracker.trigger_recheck();

    assert_eq!(tracker.current_username().as_deref(), Some("alice"));
    assert!(storage.get(SESSION_STORAGE_KEY).unwrap().is_some());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("local_storage.json.corrupt")).unwrap(),
        "[1, 2"
    );

    tracker.record_logout().unwrap();
    assert_eq!(tracker.current_username(), None);
    assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);
}

#[test]
fn given_corrupted_file_when_removing_then_succeeds_and_reads_empty() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path());
    std::fs::write(storage.path(), "{\"a\": 1").unwrap();

    storage.remove("a").unwrap();

    assert_eq!(storage.get("a").unwrap(), None);
}
