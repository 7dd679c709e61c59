use crate::{Comment, Thread};

/// **VALUE**: Verifies that API payloads with offset timestamps deserialize.
///
/// **WHY THIS MATTERS**: The API serializes TIMESTAMPTZ columns with the database
/// offset (e.g. `+08:00`), not always `Z`.
///
/// **BUG THIS CATCHES**: Would catch switching timestamps to a type that only accepts UTC.
#[test]
fn given_api_thread_json_when_deserialized_then_timestamps_normalized_to_utc() {
    // GIVEN: A thread as returned by GET /threads/{id}
    let json = r#"{
        "id": 7,
        "title": "Shiba facts",
        "content": "They are good dogs",
        "tags": ["dogs", "facts"],
        "creator_id": "0b8a5d5e-7f8c-4a43-9d0e-0d5b0a4f7c11",
        "created_timestamp": "2024-12-01T18:00:00+08:00",
        "updated_timestamp": "2024-12-01T10:30:00Z"
    }"#;

    // WHEN: Deserializing
    let thread: Thread = serde_json::from_str(json).unwrap();

    // THEN: Offsets are normalized and edits detected
    assert_eq!(thread.id, 7);
    assert_eq!(thread.tags, vec!["dogs", "facts"]);
    assert_eq!(thread.created_timestamp.to_rfc3339(), "2024-12-01T10:00:00+00:00");
    assert!(thread.was_edited());
}

#[test]
fn given_comment_json_when_deserialized_then_fields_map() {
    let json = r#"{
        "id": 3,
        "content": "agreed",
        "thread_id": 7,
        "creator_id": "0b8a5d5e-7f8c-4a43-9d0e-0d5b0a4f7c11",
        "created_timestamp": "2024-12-01T10:00:00Z",
        "updated_timestamp": "2024-12-01T10:00:00Z"
    }"#;

    let comment: Comment = serde_json::from_str(json).unwrap();

    assert_eq!(comment.thread_id, 7);
    assert!(!comment.was_edited());
}
