// Unit tests for text rendering

use crate::commands::threads::{CommentView, ThreadListing, ThreadSummary, ThreadView};
use crate::render::{self, Printer};

use models::{Comment, Page, Thread};

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn thread(tags: &[&str]) -> Thread {
    Thread {
        id: 3,
        title: "Hello".to_string(),
        content: "First post".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        creator_id: Uuid::nil(),
        created_timestamp: now() - Duration::hours(3),
        updated_timestamp: now() - Duration::hours(3),
    }
}

#[test]
fn given_threads_when_rendering_listing_then_lines_and_footer() {
    let listing = ThreadListing {
        tags: vec!["rust".to_string()],
        threads: Page {
            items: vec![ThreadSummary {
                thread: thread(&["rust"]),
                author: "alice".to_string(),
            }],
            total_count: 11,
            page: 1,
            page_size: 10,
        },
    };

    let text = render::thread_listing(&listing, now());

    assert!(text.starts_with("Tags: rust\n"));
    assert!(text.contains("#3 Hello  by alice, about 3 hours ago  [rust]"));
    assert!(text.ends_with("Page 1 of 2 (11 threads)"));
}

#[test]
fn given_no_threads_when_rendering_listing_then_empty_message() {
    let listing = ThreadListing {
        tags: Vec::new(),
        threads: Page::default(),
    };

    assert_eq!(render::thread_listing(&listing, now()), "No threads found");
}

/// **VALUE**: Verifies owned and edited items are marked.
///
/// **BUG THIS CATCHES**: Would catch the surface check result being dropped on the way
/// to the output.
#[test]
fn given_owned_edited_comment_when_rendering_thread_then_marked() {
    let comment = Comment {
        id: 8,
        content: "Nice".to_string(),
        thread_id: 3,
        creator_id: Uuid::nil(),
        created_timestamp: now() - Duration::minutes(10),
        updated_timestamp: now() - Duration::minutes(2),
    };
    let view = ThreadView {
        summary: ThreadSummary {
            thread: thread(&[]),
            author: "bob".to_string(),
        },
        can_edit: false,
        comments: Page {
            items: vec![CommentView {
                comment,
                author: "alice".to_string(),
                can_edit: true,
            }],
            total_count: 1,
            page: 1,
            page_size: 10,
        },
    };

    let text = render::thread_view(&view, now());

    assert!(text.contains("by bob, about 3 hours ago\n"));
    assert!(text.contains("[8] alice, 10 minutes ago (edited 2 minutes ago) [yours]"));
    assert!(text.ends_with("Comments page 1 of 1"));
}

#[test]
fn given_session_states_when_rendering_then_readable() {
    assert_eq!(render::session_change(Some("alice")), "Logged in as alice");
    assert_eq!(render::session_change(None), "Logged out");
    assert_eq!(render::whoami(None), "Not logged in");
    assert!(render::whoami(Some("alice")).starts_with("alice\nhttps://api.dicebear.com/"));
}

/// **VALUE**: Verifies a line that cannot be encoded is reported instead of dropped silently.
///
/// **WHY THIS MATTERS**: `watch` prints every session change as it happens; a failed
/// line must neither end the watch nor vanish without a trace in the log.
#[test]
fn given_unencodable_value_when_emitting_logged_json_then_false_without_panic() {
    let printer = Printer { json: true };
    // JSON object keys must be strings
    let value: HashMap<(i32, i32), i32> = HashMap::from([((1, 2), 3)]);

    assert!(printer.emit(&value, |_| String::new()).is_err());
    assert!(!printer.emit_logged(&value, |_| String::new()));
    assert!(printer.emit_logged(&Some("alice"), |_| String::new()));
}
