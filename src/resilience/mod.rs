//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to a remote service:
//!     → retries.rs (classify failure, retry transient ones)
//!     → backoff.rs (delay before each retry)
//!     → timeouts.rs (optional outer deadline around the whole loop)
//! ```
//!
//! # Design Decisions
//! - One canonical policy: exponential backoff, capped, no jitter
//! - Only network-class failures are retried
//! - No built-in cancellation; an outer deadline drops the loop instead

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use backoff::BackoffSchedule;
pub use retries::{is_retryable_error, RetryPolicy, RetryableCaller};
pub use timeouts::{with_deadline, DeadlineExceeded};
