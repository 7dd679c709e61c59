//! Surface permission checks.
//!
//! These only decide which affordances to offer (edit and delete buttons,
//! the "new thread" action). Local storage can be tampered with, so the
//! answer is never trusted for anything else; the API re-checks the cookie.

use crate::session::SessionTracker;

/// Whether the tracked user appears to be `target_username`.
pub fn check_surface(tracker: &SessionTracker, target_username: &str) -> bool {
    matches_username(tracker.current_username().as_deref(), target_username)
}

/// Whether creating content should be offered at all.
pub fn can_create(tracker: &SessionTracker) -> bool {
    tracker.is_logged_in()
}

pub(crate) fn matches_username(current: Option<&str>, target_username: &str) -> bool {
    match current {
        Some(username) => !username.is_empty() && username == target_username,
        None => false,
    }
}
