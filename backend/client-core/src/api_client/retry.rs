use crate::config::ApiConfig;
use crate::error::api_client::ApiClientError;

use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use backoff::backoff::Backoff;
use log::{debug, warn};
use tokio::time::sleep as TokioSleep;

/// Bounds for retrying idempotent requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_interval: Duration,
    pub max_elapsed: Duration,
}

impl RetryPolicy {
    /// Never retry.
    pub fn none() -> Self {
        Self {
            initial_interval: Duration::ZERO,
            max_elapsed: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.max_elapsed.is_zero()
    }
}

impl From<&ApiConfig> for RetryPolicy {
    fn from(config: &ApiConfig) -> Self {
        Self {
            initial_interval: config.retry_initial_interval(),
            max_elapsed: config.retry_max_elapsed(),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::from(&ApiConfig::default())
    }
}

/// Run `operation` until it succeeds, fails permanently, or the policy runs out.
///
/// Only errors reporting [`ApiClientError::is_retryable`] are retried.
pub(crate) async fn with_retry<T, F, Fut>(
    policy: RetryPolicy,
    what: &str,
    mut operation: F,
) -> Result<T, ApiClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiClientError>>,
{
    let mut backoff = ExponentialBackoffBuilder::new()
        .with_initial_interval(policy.initial_interval.max(Duration::from_millis(1)))
        .with_max_elapsed_time(Some(policy.max_elapsed))
        .build();
    let mut attempt: u32 = 1;

    loop {
        match operation().await {
            Err(e) if policy.is_enabled() && e.is_retryable() => match backoff.next_backoff() {
                Some(delay) => {
                    warn!("{what} failed (attempt {attempt}), retrying in {delay:?}: {e}");
                    TokioSleep(delay).await;
                    attempt += 1;
                }
                None => {
                    debug!("{what} giving up after {attempt} attempts");
                    return Err(e);
                }
            },
            result => return result,
        }
    }
}
