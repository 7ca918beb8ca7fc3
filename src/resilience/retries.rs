//! Retry logic.
//!
//! # Responsibilities
//! - Decide whether an error is transient (network-class) or terminal
//! - Re-run an async operation with exponential backoff between attempts
//!
//! # Design Decisions
//! - Classification is a case-insensitive substring match on the error
//!   message, so any `Display` error type can be retried
//! - Terminal errors are returned on the first failure, never retried
//! - The last error is returned verbatim once retries are exhausted
//! - Waiting uses `tokio::time::sleep`; other tasks keep running

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::schema::RetryConfig;
use crate::observability::metrics;
use crate::resilience::backoff::BackoffSchedule;

/// Message fragments that mark an error as a transient network failure.
pub const RETRYABLE_MESSAGES: [&str; 7] = [
    "failed to fetch",
    "network request failed",
    "econnrefused",
    "etimedout",
    "timeout",
    "enotfound",
    "network error",
];

/// True if the error's message names a transient network failure.
pub fn is_retryable_error(error: &dyn fmt::Display) -> bool {
    let message = error.to_string().to_lowercase();
    RETRYABLE_MESSAGES.iter().any(|m| message.contains(m))
}

/// Bounds for a retry loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total calls are at most `max_retries + 1`.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn no_retries() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            backoff_multiplier: config.backoff_multiplier,
        }
    }
}

type RetryCallback = Arc<dyn Fn(u32, &dyn fmt::Display) + Send + Sync>;

/// Runs an async operation, retrying transient failures with backoff.
///
/// ```no_run
/// # use stellaraid_core::resilience::retries::{RetryableCaller, RetryPolicy};
/// # async fn fetch() -> Result<u32, String> { Ok(1) }
/// # async fn run() -> Result<u32, String> {
/// let caller = RetryableCaller::new(RetryPolicy::default())
///     .on_retry(|attempt, err| eprintln!("retry #{attempt}: {err}"));
/// let value = caller.call(|| fetch()).await?;
/// # Ok(value)
/// # }
/// ```
#[derive(Clone, Default)]
pub struct RetryableCaller {
    policy: RetryPolicy,
    on_retry: Option<RetryCallback>,
}

impl RetryableCaller {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            on_retry: None,
        }
    }

    /// Invoke `f(attempt, &error)` before each retry; `attempt` starts at 1.
    pub fn on_retry<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, &dyn fmt::Display) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(f));
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Call `op` until it succeeds, fails terminally, or retries run out.
    pub async fn call<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut delays = BackoffSchedule::new(&self.policy);
        let mut attempt: u32 = 0;

        loop {
            let error = match op().await {
                Ok(value) => {
                    if attempt > 0 {
                        tracing::debug!(attempts = attempt + 1, "Operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) => e,
            };

            if !is_retryable_error(&error) {
                tracing::debug!(error = %error, "Non-retryable error, giving up");
                return Err(error);
            }

            if attempt >= self.policy.max_retries {
                tracing::warn!(
                    attempts = attempt + 1,
                    error = %error,
                    "Retries exhausted"
                );
                metrics::record_retry_exhausted();
                return Err(error);
            }

            attempt += 1;
            if let Some(callback) = &self.on_retry {
                callback(attempt, &error);
            }

            let delay = delays.next_delay();
            tracing::warn!(
                attempt,
                max_retries = self.policy.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Transient failure, retrying"
            );
            metrics::record_retry_attempt();
            tokio::time::sleep(delay).await;
        }
    }
}

impl fmt::Debug for RetryableCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryableCaller")
            .field("policy", &self.policy)
            .field("on_retry", &self.on_retry.is_some())
            .finish()
    }
}
