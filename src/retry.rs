use sea_orm::error::{DbErr, SqlErr};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Configuration for bounded retry with incremental backoff.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, counting the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
            backoff_factor: 2.0,
        }
    }
}

/// Decides whether a given error is worth another attempt.
pub trait RetryPolicy<E> {
    fn is_retryable(&self, error: &E) -> bool;
}

/// Retries only unique-constraint violations, the one collision class the
/// submission path recovers from by regenerating its document number.
pub struct DuplicateKeyPolicy;

impl RetryPolicy<DbErr> for DuplicateKeyPolicy {
    fn is_retryable(&self, error: &DbErr) -> bool {
        is_duplicate_key(error)
    }
}

/// Whether a database error is a unique-constraint collision.
pub fn is_duplicate_key(error: &DbErr) -> bool {
    matches!(error.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Runs `operation` until it succeeds, the policy declares the error
/// non-retryable, or the attempt budget is exhausted.
pub async fn with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    policy: impl RetryPolicy<E>,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = config.initial_delay;
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation(attempt).await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(attempt, "operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(error) => {
                if attempt >= config.max_attempts || !policy.is_retryable(&error) {
                    warn!(attempt, %error, "operation failed, giving up");
                    return Err(error);
                }

                warn!(attempt, %error, delay = ?delay, "operation failed, retrying");
                sleep(delay).await;

                delay = Duration::from_secs_f64(
                    (delay.as_secs_f64() * config.backoff_factor)
                        .min(config.max_delay.as_secs_f64()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct AlwaysRetry;

    impl RetryPolicy<String> for AlwaysRetry {
        fn is_retryable(&self, _error: &String) -> bool {
            true
        }
    }

    struct NeverRetry;

    impl RetryPolicy<String> for NeverRetry {
        fn is_retryable(&self, _error: &String) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn retries_up_to_max_attempts() {
        let config = RetryConfig {
            initial_delay: Duration::from_millis(1),
            ..Default::default()
        };
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = with_retry(&config, AlwaysRetry, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("collision".to_string()) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retryable_errors_fail_immediately() {
        let config = RetryConfig::default();
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = with_retry(&config, NeverRetry, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("fatal".to_string()) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn success_stops_retrying() {
        let config = RetryConfig {
            initial_delay: Duration::from_millis(1),
            ..Default::default()
        };
        let calls = AtomicU32::new(0);

        let result: Result<u32, String> = with_retry(&config, AlwaysRetry, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err("collision".to_string())
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
