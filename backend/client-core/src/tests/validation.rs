// Unit tests for client-side input validation

use crate::error::validation::ValidationFailure;
use crate::validation::{
    build_thread_draft, validate_content, validate_credentials, validate_new_tag, validate_page,
    validate_title, validate_username,
};

use models::Credentials;

// ============================================
// USERNAME / PASSWORD
// ============================================

/// **VALUE**: Verifies the username rules the API enforces are checked locally.
///
/// **WHY THIS MATTERS**: Sign-up should fail with a precise message before a request
/// is made, not with a generic 400 from the server.
///
/// **BUG THIS CATCHES**: Would catch a regex that forgets the anchors or the length
/// check being skipped.
#[test]
fn given_usernames_when_validating_then_length_and_charset_are_enforced() {
    assert!(validate_username("abc").is_ok());
    assert!(validate_username("a_b-C9").is_ok());
    assert!(validate_username(&"x".repeat(20)).is_ok());

    let short = validate_username("ab").unwrap_err();
    assert_eq!(
        short.reason(),
        &ValidationFailure::TooShort { min: 3, actual: 2 }
    );

    let long = validate_username(&"x".repeat(21)).unwrap_err();
    assert_eq!(
        long.reason(),
        &ValidationFailure::TooLong { max: 20, actual: 21 }
    );

    let invalid = validate_username("bad name").unwrap_err();
    assert_eq!(invalid.reason(), &ValidationFailure::InvalidCharacters);
    assert_eq!(
        invalid.user_message(),
        "Username can only contain letters, numbers, underscores, and hyphens"
    );
}

/// **VALUE**: Verifies the password minimum is counted in characters.
///
/// **BUG THIS CATCHES**: Would catch byte-length counting letting a 4-character
/// multibyte password through.
#[test]
fn given_short_password_when_validating_credentials_then_password_field_fails() {
    let error = validate_credentials(&Credentials::new("alice", "ñññññññ")).unwrap_err();

    assert_eq!(error.field_name(), "password");
    assert_eq!(
        error.user_message(),
        "Password must be at least 8 characters long"
    );
    assert!(validate_credentials(&Credentials::new("alice", "hunter22")).is_ok());
}

// ============================================
// THREADS / COMMENTS
// ============================================

#[test]
fn given_title_bounds_when_validating_then_only_1_to_255_chars_pass() {
    assert!(validate_title("").is_err());
    assert!(validate_title("t").is_ok());
    assert!(validate_title(&"t".repeat(255)).is_ok());
    assert!(validate_title(&"t".repeat(256)).is_err());
}

#[test]
fn given_empty_content_when_validating_then_rejected() {
    let error = validate_content("").unwrap_err();

    assert_eq!(error.field_name(), "content");
    assert!(validate_content("x").is_ok());
}

// ============================================
// TAGS
// ============================================

/// **VALUE**: Verifies duplicate tags are reported before the count limit.
///
/// **WHY THIS MATTERS**: A user re-adding an existing tag at the limit should be told
/// the tag is already filtered, which is the actionable message.
///
/// **BUG THIS CATCHES**: Would catch the checks being reordered.
#[test]
fn given_full_tag_list_when_adding_duplicate_then_duplicate_is_reported() {
    let existing: Vec<String> = ["a", "b", "c", "d", "e"].map(String::from).to_vec();

    let duplicate = validate_new_tag("c", &existing).unwrap_err();
    assert_eq!(
        duplicate.reason(),
        &ValidationFailure::Duplicate {
            value: "c".to_string()
        }
    );
    assert_eq!(duplicate.user_message(), "Tag is already being filtered");

    let too_many = validate_new_tag("f", &existing).unwrap_err();
    assert_eq!(too_many.reason(), &ValidationFailure::TooMany { max: 5 });
    assert_eq!(too_many.user_message(), "There cannot be more than 5 tags");
}

#[test]
fn given_tag_lengths_when_validating_then_only_1_to_35_chars_pass() {
    assert!(validate_new_tag("", &[]).is_err());
    assert!(validate_new_tag(&"t".repeat(35), &[]).is_ok());
    assert!(validate_new_tag(&"t".repeat(36), &[]).is_err());
}

#[test]
fn given_page_zero_when_validating_then_out_of_range() {
    let error = validate_page(0).unwrap_err();

    assert_eq!(
        error.reason(),
        &ValidationFailure::OutOfRange { min: 1, actual: 0 }
    );
    assert!(validate_page(1).is_ok());
}

// ============================================
// THREAD DRAFT
// ============================================

/// **VALUE**: Verifies a valid draft carries every field through unchanged.
#[test]
fn given_valid_fields_when_building_thread_draft_then_draft_matches_input() {
    let tags = vec!["rust".to_string(), "help".to_string()];

    let draft = build_thread_draft("Title", "Body", &tags).unwrap();

    assert_eq!(draft.title, "Title");
    assert_eq!(draft.content, "Body");
    assert_eq!(draft.tags, tags);
}

/// **VALUE**: Verifies duplicate tags in a new thread fail with the tag field.
///
/// **BUG THIS CATCHES**: Would catch the draft builder silently deduplicating or
/// the error being attributed to the wrong field.
#[test]
fn given_duplicate_tags_when_building_thread_draft_then_tag_field_fails() {
    let tags = vec!["rust".to_string(), "rust".to_string()];

    let error = build_thread_draft("Title", "Body", &tags).unwrap_err();

    assert_eq!(error.field_name(), "tag");
}
