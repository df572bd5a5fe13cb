use crate::utils::error::{Result, ReviewError};
use std::future::Future;
use std::time::Duration;

/// Bounded retry with exponential backoff.
///
/// The delay after the n-th failed attempt is `multiplier * 2^(n-1)`, capped
/// at `max_delay`. When the last attempt fails the error is wrapped in
/// [`ReviewError::RetryExhausted`] and returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub multiplier: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            multiplier: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, multiplier: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            multiplier,
            max_delay,
        }
    }

    pub fn delay_for(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1).min(31);
        self.multiplier
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }

    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt_fn: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match attempt_fn(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= max_attempts => {
                    tracing::error!(
                        "❌ {} failed on final attempt {}/{}: {}",
                        operation,
                        attempt,
                        max_attempts,
                        e
                    );
                    return Err(ReviewError::RetryExhausted {
                        operation: operation.to_string(),
                        attempts: attempt,
                        last_error: Box::new(e),
                    });
                }
                Err(e) => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        "⚠️ {} attempt {}/{} failed: {}; retrying in {:?}",
                        operation,
                        attempt,
                        max_attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
