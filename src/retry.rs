//! Retry helper for outbound HTTP calls.
//!
//! Wraps an async operation and re-runs it with exponential backoff while the error is
//! classified as transient. Used for Keycloak calls on the server and for every API call
//! made by the launcher.

use std::{fmt::Display, future::Future, time::Duration};

use tokio::time::sleep;

/// Retry budget and backoff base.
///
/// The delay before retry `n` (1-based) is `base_delay * 2^n`, giving 2s, 4s and 8s with
/// the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay to wait before the given 1-based retry attempt.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let multiplier = 1u32.checked_shl(retry.min(16)).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(multiplier)
    }
}

/// Runs `op`, retrying while `is_transient` accepts the error and the budget allows.
///
/// # Arguments
/// - `policy` - Retry budget and backoff base
/// - `is_transient` - Classifies an error as worth retrying
/// - `op` - Produces a fresh future for every attempt
///
/// # Returns
/// - `Ok(T)` - First successful result
/// - `Err(E)` - A permanent error, or the last transient error once retries ran out
pub async fn retry<T, E, F, Fut, P>(policy: &RetryPolicy, is_transient: P, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let mut retries = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if retries < policy.max_retries && is_transient(&err) => {
                retries += 1;
                let wait = policy.delay_for(retries);
                tracing::warn!(
                    retry = retries,
                    max_retries = policy.max_retries,
                    wait_ms = wait.as_millis() as u64,
                    error = %err,
                    "transient failure, retrying"
                );
                sleep(wait).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Timeouts, connection failures, 5xx and 429 responses are worth retrying.
pub fn is_transient_reqwest(err: &reqwest::Error) -> bool {
    if err.is_timeout() || err.is_connect() {
        return true;
    }

    match err.status() {
        Some(status) => status.is_server_error() || status.as_u16() == 429,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(1),
        }
    }

    #[test]
    fn default_delays_double_from_two_seconds() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(8));
    }

    #[tokio::test]
    async fn returns_first_success_without_retrying() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, String> = retry(&fast_policy(), |_| true, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        })
        .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_transient_errors_until_success() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, String> = retry(&fast_policy(), |_| true, || async {
            let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt < 3 {
                Err(format!("attempt {} failed", attempt))
            } else {
                Ok(attempt)
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, String> = retry(&fast_policy(), |_| true, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err("still down".to_string())
        })
        .await;

        assert_eq!(result, Err("still down".to_string()));
        // One initial attempt plus three retries.
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn does_not_retry_permanent_errors() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, String> = retry(
            &fast_policy(),
            |err: &String| err != "bad request",
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("bad request".to_string())
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
