use crate::SessionRecord;

const ONE_HOUR_MS: i64 = 60 * 60 * 1000;

/// **VALUE**: Verifies the storage format matches `{"username", "expiry"}`.
///
/// **WHY THIS MATTERS**: Records written by one version of the client are read back by
/// the next. Renaming the field silently logs every user out.
///
/// **BUG THIS CATCHES**: Would catch removal of the `#[serde(rename = "expiry")]`.
#[test]
fn given_record_when_serialized_then_uses_expiry_field_name() {
    // GIVEN: A record created at T=1000 with a one hour window
    let record = SessionRecord::new("alice", 1_000, ONE_HOUR_MS);

    // WHEN: Serializing
    let json = serde_json::to_value(&record).unwrap();

    // THEN: Field names match the stored format
    assert_eq!(json["username"], "alice");
    assert_eq!(json["expiry"], 1_000 + ONE_HOUR_MS);
}

/// **VALUE**: Verifies the expiry boundary is exclusive.
///
/// **WHY THIS MATTERS**: The tracker and the poll task both use this predicate; they must
/// agree on the exact instant a session ends.
///
/// **BUG THIS CATCHES**: Would catch `<=` creeping into `is_valid_at`.
#[test]
fn given_now_equal_to_expiry_when_checking_then_record_is_expired() {
    let record = SessionRecord::new("alice", 0, ONE_HOUR_MS);

    assert!(record.is_valid_at(ONE_HOUR_MS - 1));
    assert!(record.is_expired_at(ONE_HOUR_MS));
    assert!(record.is_expired_at(ONE_HOUR_MS + 1));
}

/// **BUG THIS CATCHES**: Would catch integer overflow panics for absurd windows.
#[test]
fn given_huge_window_when_creating_record_then_expiry_saturates() {
    let record = SessionRecord::new("alice", i64::MAX - 5, ONE_HOUR_MS);

    assert_eq!(record.expires_at_epoch_ms, i64::MAX);
}
