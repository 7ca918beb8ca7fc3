//! Deadline enforcement.
//!
//! A retry loop has no cancellation hook of its own; callers that need an
//! upper bound race it against a deadline here. The losing future is dropped,
//! which cancels any pending backoff sleep.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The wrapped future did not complete before its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Deadline of {0:?} exceeded")]
pub struct DeadlineExceeded(pub Duration);

/// Run `fut` to completion or give up after `deadline`.
pub async fn with_deadline<F>(deadline: Duration, fut: F) -> Result<F::Output, DeadlineExceeded>
where
    F: Future,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| DeadlineExceeded(deadline))
}
