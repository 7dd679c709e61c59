// Unit tests for surface permission checks

use crate::permissions::{can_create, check_surface, matches_username};
use crate::session::{ManualClock, MemoryStorage, SessionSettings, SessionTracker};

use std::sync::Arc;

#[test]
fn given_usernames_when_matching_then_only_exact_non_empty_match() {
    assert!(matches_username(Some("alice"), "alice"));
    assert!(!matches_username(Some("alice"), "Alice"));
    assert!(!matches_username(Some(""), ""));
    assert!(!matches_username(None, "alice"));
}

/// **VALUE**: Verifies the check follows the tracked username.
///
/// **WHY THIS MATTERS**: Edit and delete affordances must only be offered to the
/// creator while their session is believed valid.
///
/// **BUG THIS CATCHES**: Would catch the check reading storage directly instead of the
/// tracker, which would ignore expiry.
#[tokio::test]
async fn given_logged_in_tracker_when_checking_surface_then_only_owner_matches() {
    let tracker = SessionTracker::new(
        Arc::new(MemoryStorage::new()),
        Arc::new(ManualClock::new(0)),
        SessionSettings::default(),
    );
    assert!(!can_create(&tracker));
    assert!(!check_surface(&tracker, "alice"));

    tracker.record_login("alice").unwrap();
    tracker.trigger_recheck();

    assert!(can_create(&tracker));
    assert!(check_surface(&tracker, "alice"));
    assert!(!check_surface(&tracker, "bob"));
}
