// Unit tests for the retry loop

use crate::api_client::retry::{RetryPolicy, with_retry};
use crate::error::api_client::ApiClientError;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        initial_interval: Duration::from_millis(1),
        max_elapsed: Duration::from_millis(500),
    }
}

/// **VALUE**: Verifies transient failures are retried until success.
///
/// **BUG THIS CATCHES**: Would catch the loop returning the first error.
#[tokio::test]
async fn given_transient_failure_when_retrying_then_eventually_succeeds() {
    let attempts = Arc::new(AtomicU32::new(0));

    let result = with_retry(fast_policy(), "test", || {
        let attempts = Arc::clone(&attempts);
        async move {
            if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(ApiClientError::from_http_response(503, ""))
            } else {
                Ok(42)
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

/// **VALUE**: Verifies permanent failures are returned without retrying.
///
/// **BUG THIS CATCHES**: Would catch 404s being retried until the deadline.
#[tokio::test]
async fn given_permanent_failure_when_retrying_then_single_attempt() {
    let attempts = Arc::new(AtomicU32::new(0));

    let result: Result<(), _> = with_retry(fast_policy(), "test", || {
        let attempts = Arc::clone(&attempts);
        async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(ApiClientError::from_http_response(404, ""))
        }
    })
    .await;

    assert!(matches!(result, Err(ApiClientError::NotFound { .. })));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_disabled_policy_when_transient_failure_then_single_attempt() {
    let attempts = Arc::new(AtomicU32::new(0));

    let result: Result<(), _> = with_retry(RetryPolicy::none(), "test", || {
        let attempts = Arc::clone(&attempts);
        async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(ApiClientError::from_http_response(503, ""))
        }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}
