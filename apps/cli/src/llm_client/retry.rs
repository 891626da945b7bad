//! Bounded retry with a fixed delay between attempts.
//!
//! Each attempt reports an [`AttemptOutcome`]. Fatal outcomes end the loop at once;
//! retryable ones are retried until `max_attempts` is reached, after which the last
//! error is wrapped in [`LlmError::RetriesExhausted`]. Nothing here terminates the
//! process; the caller decides what an exhausted budget means.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::LlmError;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_DELAY: Duration = Duration::from_secs(3);

/// Result of a single call attempt.
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    Success(T),
    Retryable(LlmError),
    Fatal(LlmError),
}

impl<T> From<Result<T, LlmError>> for AttemptOutcome<T> {
    fn from(result: Result<T, LlmError>) -> Self {
        match result {
            Ok(value) => AttemptOutcome::Success(value),
            Err(e) if e.is_retryable() => AttemptOutcome::Retryable(e),
            Err(e) => AttemptOutcome::Fatal(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Zero is treated as one.
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Runs `op` until it succeeds, fails fatally or the attempt budget is spent.
    /// `op` receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, LlmError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = AttemptOutcome<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt).await {
                AttemptOutcome::Success(value) => return Ok(value),
                AttemptOutcome::Fatal(e) => return Err(e),
                AttemptOutcome::Retryable(e) if attempt >= attempts => {
                    return Err(LlmError::RetriesExhausted {
                        attempts,
                        last: Box::new(e),
                    });
                }
                AttemptOutcome::Retryable(e) => {
                    warn!(
                        attempt,
                        error = %e,
                        delay_ms = self.delay.as_millis() as u64,
                        "LLM call failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
