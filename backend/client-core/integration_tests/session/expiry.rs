//! Expiry polling, driven by Tokio's paused clock for the poll interval and a
//! manual wall clock for the record's expiry.

use client_core::session::{
    LocalStorage, ManualClock, MemoryStorage, SESSION_STORAGE_KEY, SessionSettings,
    SessionTracker,
};

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{advance, timeout};

const POLL_INTERVAL: Duration = Duration::from_secs(5);

fn tracker_with(storage: Arc<MemoryStorage>, clock: Arc<ManualClock>) -> SessionTracker {
    SessionTracker::start(storage, clock, SessionSettings::default())
}

/// **VALUE**: Verifies the one hour scenario end to end.
///
/// **WHY THIS MATTERS**: This is the core promise of the tracker: the username
/// disappears on its own once the server credential would have expired.
///
/// **BUG THIS CATCHES**: Would catch the poll task never starting, checking the wrong
/// clock, or publishing `None` without removing the stored record.
#[tokio::test(start_paused = true)]
async fn given_login_at_zero_when_hour_passes_then_logged_out_on_next_tick() {
    let storage = Arc::new(MemoryStorage::new());
    let clock = Arc::new(ManualClock::new(0));
    let tracker = tracker_with(storage.clone(), clock.clone());

    tracker.record_login("alice").unwrap();
    tracker.trigger_recheck();
    let mut rx = tracker.subscribe();

    clock.set(3_599_000);
    advance(POLL_INTERVAL).await;
    tokio::task::yield_now().await;
    assert_eq!(tracker.current_username().as_deref(), Some("alice"));

    clock.set(3_600_001);
    timeout(Duration::from_secs(30), rx.changed())
        .await
        .expect("poll should notice expiry")
        .expect("tracker still alive");

    assert_eq!(*rx.borrow(), None);
    assert_eq!(storage.get(SESSION_STORAGE_KEY).unwrap(), None);
    assert!(!tracker.is_polling());
}

/// **VALUE**: Verifies nothing changes between ticks even if the record has expired.
///
/// **BUG THIS CATCHES**: Would catch an interval that fires immediately on start.
#[tokio::test(start_paused = true)]
async fn given_expired_between_ticks_when_before_next_tick_then_still_logged_in() {
    let storage = Arc::new(MemoryStorage::new());
    let clock = Arc::new(ManualClock::new(0));
    let tracker = tracker_with(storage, clock.clone());
    tracker.record_login("alice").unwrap();
    tracker.trigger_recheck();

    clock.set(3_600_000);
    advance(Duration::from_secs(4)).await;
    tokio::task::yield_now().await;

    assert_eq!(tracker.current_username().as_deref(), Some("alice"));
}

/// **VALUE**: Verifies an expiring poll does not delete a record written by a newer login.
///
/// **WHY THIS MATTERS**: A login that has not been rechecked yet must survive the old
/// session's expiry, otherwise the next recheck reports the new user as logged out.
///
/// **BUG THIS CATCHES**: Would catch the poll removing the key unconditionally.
#[tokio::test(start_paused = true)]
async fn given_newer_login_stored_when_old_session_expires_then_new_record_kept() {
    let storage = Arc::new(MemoryStorage::new());
    let clock = Arc::new(ManualClock::new(0));
    let tracker = tracker_with(storage.clone(), clock.clone());
    tracker.record_login("alice").unwrap();
    tracker.trigger_recheck();
    let mut rx = tracker.subscribe();

    clock.set(3_600_000);
    tracker.record_login("bob").unwrap();

    timeout(Duration::from_secs(30), rx.changed())
        .await
        .expect("poll should notice expiry")
        .expect("tracker still alive");
    assert_eq!(*rx.borrow(), None);
    assert!(storage.get(SESSION_STORAGE_KEY).unwrap().is_some());

    tracker.trigger_recheck();
    assert_eq!(tracker.current_username().as_deref(), Some("bob"));
}

/// **VALUE**: Verifies dropping the tracker stops its poll task.
///
/// **WHY THIS MATTERS**: A leaked poll keeps a storage handle alive and may delete a
/// record long after the owner is gone.
///
/// **BUG THIS CATCHES**: Would catch a missing `Drop` impl. The channel only closes
/// once the aborted task has released its sender.
#[tokio::test(start_paused = true)]
async fn given_polling_tracker_when_dropped_then_poll_task_aborted() {
    let clock = Arc::new(ManualClock::new(0));
    let tracker = tracker_with(Arc::new(MemoryStorage::new()), clock);
    tracker.record_login("alice").unwrap();
    tracker.trigger_recheck();
    let mut rx = tracker.subscribe();
    assert!(tracker.is_polling());

    drop(tracker);

    let closed = timeout(Duration::from_secs(1), rx.changed())
        .await
        .expect("sender should close without waiting for a tick");
    assert!(closed.is_err());
}
