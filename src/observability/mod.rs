//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters for retries, address checks, Horizon calls)
//!
//! Consumers:
//!     → stdout (pretty for development, JSON for machines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; the binary installs subscribers
//! - Metric updates are no-ops until a recorder is installed
//! - Secrets (seeds, admin keys) never appear in logs or labels

pub mod logging;
pub mod metrics;
