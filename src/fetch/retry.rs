//! Bounded retry with linear backoff
//!
//! Only failures classified as transient by [`FetchError::is_transient`]
//! are retried; a 4xx or decode failure propagates on the first attempt.
//! The delay before retry `i` (1-indexed) is `base_delay * i` - linear,
//! not exponential.

use std::future::Future;
use std::time::Duration;

use crate::fetch::error::FetchError;

/// Retry budget shared by every synchronous fetch in the system.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    /// Delay unit for linear backoff.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

/// Run `operation`, re-invoking it on transient failure up to
/// `policy.max_retries` additional times. The last failure propagates
/// once the budget is exhausted.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_transient() && attempt < policy.max_retries => {
                attempt += 1;
                let delay = policy.base_delay * attempt;
                tracing::debug!(
                    url = %error.url(),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "transient fetch failure, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn test_policy() -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(1),
        }
    }

    fn status_error(code: u16) -> FetchError {
        FetchError::Status {
            url: "https://example.invalid/doc".to_string(),
            status: code,
        }
    }

    #[tokio::test]
    async fn transient_failures_are_retried_until_success() {
        let calls = AtomicU32::new(0);
        let result = with_retry(test_policy(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 3 {
                    Err(status_error(500))
                } else {
                    Ok("body".to_string())
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "body");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn exhausted_budget_surfaces_last_failure() {
        let calls = AtomicU32::new(0);
        let result: Result<String, _> = with_retry(test_policy(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(status_error(503)) }
        })
        .await;

        assert!(matches!(result, Err(FetchError::Status { status: 503, .. })));
        // 1 initial attempt + 3 retries
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn not_found_is_never_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<String, _> = with_retry(test_policy(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(status_error(404)) }
        })
        .await;

        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
