//! Error reporting subsystem.
//!
//! # Data Flow
//! ```text
//! Host application (CLI, services)
//!     → tracker.rs (enabled? sampled? build event with id + cause chain)
//!     → reporter.rs (ErrorReporter sink supplied by the host, if any)
//! ```
//!
//! # Design Decisions
//! - Configuration is passed in explicitly; there is no module-level state
//! - The reporter is an optional injected capability, not a runtime lookup
//! - Library code returns errors; only the host decides what to report

pub mod reporter;
pub mod tracker;

pub use crate::config::schema::ErrorTrackingConfig;
pub use reporter::{
    Breadcrumb, ErrorContext, ErrorEvent, ErrorReporter, Level, TracingReporter, UserContext,
};
pub use tracker::ErrorTracker;
