use crate::HttpStatusCode;

/// **VALUE**: Verifies that only transient status codes are considered retryable.
///
/// **WHY THIS MATTERS**: GET requests against the forum API are retried with backoff.
/// Retrying a 401 or 404 wastes time and hides the real failure from the user.
///
/// **BUG THIS CATCHES**: Would catch if 4xx codes other than 429 start being retried.
#[test]
fn given_status_codes_when_checking_retryable_then_only_transient_codes_match() {
    for code in [429, 502, 503, 504] {
        assert!(HttpStatusCode(code).is_retryable(), "{code} should retry");
    }

    for code in [200, 204, 400, 401, 404, 409, 500] {
        assert!(!HttpStatusCode(code).is_retryable(), "{code} should not retry");
    }
}

/// **VALUE**: Verifies the status class helpers agree with HTTP ranges.
///
/// **BUG THIS CATCHES**: Would catch off-by-one errors at the 2xx/4xx/5xx boundaries.
#[test]
fn given_boundary_codes_when_classifying_then_ranges_are_exclusive() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode::NO_CONTENT.is_success());
    assert!(!HttpStatusCode(300).is_success());

    assert!(HttpStatusCode::BAD_REQUEST.is_client_error());
    assert!(HttpStatusCode(499).is_client_error());
    assert!(!HttpStatusCode(500).is_client_error());

    assert!(HttpStatusCode(500).is_server_error());
    assert!(!HttpStatusCode(600).is_server_error());
}
