//! Rechecks racing from several threads on a shared tracker.

use client_core::session::{
    LocalStorage, ManualClock, MemoryStorage, SESSION_STORAGE_KEY, SessionSettings,
    SessionTracker,
};

use std::sync::{Arc, Barrier};
use std::time::Duration;

use tokio::runtime::Handle;

const THREADS: usize = 8;
const ROUNDS: usize = 50;
const EXPIRY_MS: i64 = 60 * 60 * 1000;

/// **VALUE**: Verifies concurrent rechecks leave a single poll task that shutdown can stop.
///
/// **WHY THIS MATTERS**: The tracker is shared behind an `Arc` and every method takes
/// `&self`. If two rechecks both cancel and then both spawn, one task handle is
/// overwritten and that task keeps running after `shutdown()` and drop.
///
/// **BUG THIS CATCHES**: Would catch the poll slot being released between cancelling
/// the old task and storing the new one.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_concurrent_rechecks_when_shut_down_then_no_poll_task_outlives_tracker() {
    let settings = SessionSettings {
        poll_interval: Duration::from_millis(5),
        ..SessionSettings::default()
    };

    for round in 0..ROUNDS {
        let storage = Arc::new(MemoryStorage::new());
        let clock = Arc::new(ManualClock::new(0));
        let tracker = Arc::new(SessionTracker::new(
            storage.clone(),
            clock.clone(),
            settings.clone(),
        ));
        tracker.record_login("alice").unwrap();

        let barrier = Arc::new(Barrier::new(THREADS));
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                let barrier = Arc::clone(&barrier);
                let runtime = Handle::current();
                std::thread::spawn(move || {
                    let _entered = runtime.enter();
                    barrier.wait();
                    tracker.trigger_recheck();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tracker.current_username().as_deref(), Some("alice"));
        tracker.shutdown();
        assert!(!tracker.is_polling());

        clock.set(EXPIRY_MS);
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(
            storage.get(SESSION_STORAGE_KEY).unwrap().is_some(),
            "round {round}: a poll task survived shutdown and removed the record"
        );
    }
}
