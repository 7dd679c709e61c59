//! Client-side checks mirroring the forum API's input rules.
//!
//! Run before sending a request so that obviously invalid input fails fast
//! with a precise message.

use crate::error::validation::{ValidationError, ValidationFailure};

use models::limits::{
    CONTENT_MIN_CHARS, MAX_TAGS, PASSWORD_MIN_CHARS, TAG_MAX_CHARS, TAG_MIN_CHARS,
    TITLE_MAX_CHARS, TITLE_MIN_CHARS, USERNAME_MAX_CHARS, USERNAME_MIN_CHARS,
};
use models::{Credentials, ModelError, ThreadDraft, ThreadDraftBuilder};

use std::sync::OnceLock;

use regex::Regex;

const USERNAME_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";

static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn get_username_regex() -> &'static Regex {
    USERNAME_REGEX.get_or_init(|| Regex::new(USERNAME_PATTERN).expect("valid regex pattern"))
}

#[track_caller]
fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();

    if actual < min {
        return Err(ValidationError::field(
            field,
            ValidationFailure::TooShort { min, actual },
        ));
    }

    if let Some(max) = max {
        if actual > max {
            return Err(ValidationError::field(
                field,
                ValidationFailure::TooLong { max, actual },
            ));
        }
    }

    Ok(())
}

#[track_caller]
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    check_length(
        "username",
        username,
        USERNAME_MIN_CHARS,
        Some(USERNAME_MAX_CHARS),
    )?;

    if !get_username_regex().is_match(username) {
        return Err(ValidationError::field(
            "username",
            ValidationFailure::InvalidCharacters,
        ));
    }

    Ok(())
}

#[track_caller]
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    validate_username(&credentials.username)?;

    let actual = credentials.password.char_count();
    if actual < PASSWORD_MIN_CHARS {
        return Err(ValidationError::field(
            "password",
            ValidationFailure::TooShort {
                min: PASSWORD_MIN_CHARS,
                actual,
            },
        ));
    }

    Ok(())
}

#[track_caller]
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    check_length("title", title, TITLE_MIN_CHARS, Some(TITLE_MAX_CHARS))
}

#[track_caller]
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    check_length("content", content, CONTENT_MIN_CHARS, None)
}

/// Check a tag about to be added to `existing`.
#[track_caller]
pub fn validate_new_tag(tag: &str, existing: &[String]) -> Result<(), ValidationError> {
    if existing.iter().any(|t| t == tag) {
        return Err(ValidationError::field(
            "tag",
            ValidationFailure::Duplicate {
                value: tag.to_string(),
            },
        ));
    }

    if existing.len() >= MAX_TAGS {
        return Err(ValidationError::field(
            "tag",
            ValidationFailure::TooMany { max: MAX_TAGS },
        ));
    }

    check_length("tag", tag, TAG_MIN_CHARS, Some(TAG_MAX_CHARS))
}

#[track_caller]
pub fn validate_page(page: u32) -> Result<(), ValidationError> {
    if page < 1 {
        return Err(ValidationError::field(
            "page",
            ValidationFailure::OutOfRange { min: 1, actual: page },
        ));
    }
    Ok(())
}

/// Build a thread draft, checking each field with a field-specific error.
#[track_caller]
pub fn build_thread_draft(
    title: &str,
    content: &str,
    tags: &[String],
) -> Result<ThreadDraft, ValidationError> {
    validate_title(title)?;
    validate_content(content)?;

    let mut accepted: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        validate_new_tag(tag, &accepted)?;
        accepted.push(tag.clone());
    }

    ThreadDraftBuilder::default()
        .with_title(title)
        .with_content(content)
        .with_tags(accepted)
        .build()
        .map_err(|e: ModelError| {
            ValidationError::field(
                "thread",
                ValidationFailure::Rejected {
                    message: e.message().to_string(),
                },
            )
        })
}
