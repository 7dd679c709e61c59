// Unit tests for API error classification

use crate::error::api_client::{ApiClientError, GENERIC_USER_MESSAGE};
use crate::error::validation::{ValidationError, ValidationFailure};

/// **VALUE**: Verifies `{"error": "..."}` bodies are unwrapped into the message.
///
/// **BUG THIS CATCHES**: Would catch the raw JSON leaking into user-facing output.
#[test]
fn given_json_error_body_when_classifying_then_message_is_extracted() {
    let error = ApiClientError::from_http_response(404, r#"{"error":"Thread not found"}"#);

    assert!(matches!(
        &error,
        ApiClientError::NotFound { message, .. } if message == "Thread not found"
    ));
    assert_eq!(error.user_message(), "Thread not found");
    assert_eq!(error.status_code(), Some(404));
}

#[test]
fn given_plain_text_body_when_classifying_then_body_is_kept_trimmed() {
    let error = ApiClientError::from_http_response(400, "  bad page\n");

    assert!(matches!(
        &error,
        ApiClientError::BadRequest { message, .. } if message == "bad page"
    ));
}

/// **VALUE**: Verifies only transient server statuses are retryable.
///
/// **WHY THIS MATTERS**: Retrying a 401 would hammer the API and delay the error the
/// user needs to see.
///
/// **BUG THIS CATCHES**: Would catch a 500 being retried or a 503 not being retried.
#[test]
fn given_server_errors_when_checking_retryable_then_only_transient_statuses_retry() {
    assert!(ApiClientError::from_http_response(503, "").is_retryable());
    assert!(ApiClientError::from_http_response(429, "").is_retryable());
    assert!(!ApiClientError::from_http_response(500, "").is_retryable());
    assert!(!ApiClientError::from_http_response(401, "").is_retryable());
    assert!(!ApiClientError::invalid_credentials().is_retryable());
}

/// **VALUE**: Verifies failures without specific wording fall back to the generic message.
///
/// **BUG THIS CATCHES**: Would catch 5xx bodies (which may contain internals) being
/// shown verbatim.
#[test]
fn given_unhandled_failures_when_getting_user_message_then_generic_message() {
    let server = ApiClientError::from_http_response(500, r#"{"error":"db exploded"}"#);

    assert_eq!(server.user_message(), GENERIC_USER_MESSAGE);
    assert_eq!(server.status_code(), Some(500));
}

#[test]
fn given_specific_failures_when_getting_user_message_then_specific_wording() {
    assert_eq!(
        ApiClientError::invalid_credentials().user_message(),
        "The username or password is incorrect"
    );
    assert_eq!(
        ApiClientError::username_taken("alice").user_message(),
        "Username is already taken"
    );
    assert_eq!(ApiClientError::username_taken("alice").status_code(), Some(409));

    let validation = ApiClientError::from(ValidationError::field(
        "content",
        ValidationFailure::TooShort { min: 1, actual: 0 },
    ));
    assert_eq!(
        validation.user_message(),
        "Content must be at least 1 character long"
    );
}

#[test]
fn given_bad_url_when_converting_then_url_parse_variant() {
    let parse_error = url::Url::parse("not a url").unwrap_err();

    let error = ApiClientError::from(parse_error);

    assert!(matches!(error, ApiClientError::UrlParse { .. }));
    assert_eq!(error.status_code(), None);
}
