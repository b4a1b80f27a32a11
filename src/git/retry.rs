//! Exponential backoff retry for git commands that fail transiently.

use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use tracing::warn;

/// Configuration: 3 total attempts, base 1s, max 30s.
pub const MAX_ATTEMPTS: u32 = 3;
const INITIAL_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 30;

/// Retry an async operation with exponential backoff.
///
/// `attempt` is called up to `MAX_ATTEMPTS` times, sleeping for an
/// exponentially increasing duration between attempts. An error for which
/// `should_retry` returns false is returned immediately. When every attempt
/// fails, `wrap_exhausted` converts the last error into the caller's
/// `RetriesExhausted` variant.
pub async fn retry_with_backoff<T, E, Fut, F, R, W>(
    mut attempt: F,
    should_retry: R,
    wrap_exhausted: W,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    W: FnOnce(E) -> E,
    E: std::fmt::Display,
{
    let mut backoff = ExponentialBackoff {
        initial_interval: Duration::from_secs(INITIAL_INTERVAL_SECS),
        max_interval: Duration::from_secs(MAX_INTERVAL_SECS),
        max_elapsed_time: None,
        ..Default::default()
    };

    let mut attempts = 0;

    loop {
        attempts += 1;

        let error = match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !should_retry(&error) {
            return Err(error);
        }
        if attempts >= MAX_ATTEMPTS {
            return Err(wrap_exhausted(error));
        }

        warn!(attempt = attempts, "Retrying after transient failure: {}", error);
        if let Some(wait_duration) = backoff.next_backoff() {
            tokio::time::sleep(wait_duration).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient(String),
        Fatal(String),
        RetriesExhausted(Box<TestError>),
    }

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    fn is_transient(e: &TestError) -> bool {
        matches!(e, TestError::Transient(_))
    }

    fn exhausted(e: TestError) -> TestError {
        TestError::RetriesExhausted(Box::new(e))
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeds_on_first_attempt() {
        let result: Result<&str, TestError> =
            retry_with_backoff(|| async { Ok("ok") }, is_transient, exhausted).await;
        assert_eq!(result.unwrap(), "ok");
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhausts_after_max_attempts() {
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();

        let result: Result<(), TestError> = retry_with_backoff(
            move || {
                let c = count_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(TestError::Transient("locked".to_string()))
                }
            },
            is_transient,
            exhausted,
        )
        .await;

        assert_eq!(
            result,
            Err(TestError::RetriesExhausted(Box::new(TestError::Transient(
                "locked".to_string()
            ))))
        );
        assert_eq!(count.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeds_after_failures() {
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();

        let result: Result<&str, TestError> = retry_with_backoff(
            move || {
                let c = count_clone.clone();
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err(TestError::Transient("locked".to_string()))
                    } else {
                        Ok("recovered")
                    }
                }
            },
            is_transient,
            exhausted,
        )
        .await;

        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_is_not_retried() {
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();

        let result: Result<(), TestError> = retry_with_backoff(
            move || {
                let c = count_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(TestError::Fatal("hook rejected".to_string()))
                }
            },
            is_transient,
            exhausted,
        )
        .await;

        assert_eq!(result, Err(TestError::Fatal("hook rejected".to_string())));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
