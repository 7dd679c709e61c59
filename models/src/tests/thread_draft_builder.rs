use crate::{ModelError, ThreadDraftBuilder};

/// **VALUE**: Verifies a well-formed draft builds unchanged.
#[test]
fn given_valid_fields_when_building_draft_then_succeeds() {
    let draft = ThreadDraftBuilder::default()
        .with_title("Hello")
        .with_content("World")
        .with_tags(["a", "b"])
        .build()
        .unwrap();

    assert_eq!(draft.title, "Hello");
    assert_eq!(draft.tags, vec!["a", "b"]);
}

/// **VALUE**: Verifies builder rejects titles longer than 255 characters.
///
/// **WHY THIS MATTERS**: The API answers 400 for long titles; checking locally gives the
/// user a precise message without a round trip.
///
/// **BUG THIS CATCHES**: Would catch the length check counting bytes instead of characters
/// or using the wrong bound.
#[test]
fn given_title_over_limit_when_building_then_returns_validation_error() {
    let at_limit = "é".repeat(255);
    let over_limit = "a".repeat(256);

    assert!(
        ThreadDraftBuilder::default()
            .with_title(at_limit)
            .with_content("x")
            .build()
            .is_ok()
    );

    let result = ThreadDraftBuilder::default()
        .with_title(over_limit)
        .with_content("x")
        .build();

    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Title must be between 1 and 255 characters long");
        }
    }
}

#[test]
fn given_missing_content_when_building_then_returns_validation_error() {
    let result = ThreadDraftBuilder::default().with_title("t").build();

    assert_eq!(result.unwrap_err().message(), "Content is required");
}

/// **BUG THIS CATCHES**: Would catch the tag count, tag length or duplicate checks being dropped.
#[test]
fn given_invalid_tags_when_building_then_returns_validation_error() {
    let too_many = ThreadDraftBuilder::default()
        .with_title("t")
        .with_content("c")
        .with_tags(["1", "2", "3", "4", "5", "6"])
        .build();
    assert_eq!(too_many.unwrap_err().message(), "There cannot be more than 5 tags");

    let too_long = ThreadDraftBuilder::default()
        .with_title("t")
        .with_content("c")
        .with_tag("x".repeat(36))
        .build();
    assert_eq!(
        too_long.unwrap_err().message(),
        "Tag must be between 1 and 35 characters long"
    );

    let duplicate = ThreadDraftBuilder::default()
        .with_title("t")
        .with_content("c")
        .with_tags(["dogs", "dogs"])
        .build();
    assert_eq!(duplicate.unwrap_err().message(), "Duplicate tag: dogs");
}
