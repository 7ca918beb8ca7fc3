//! StellarAid core library.
//!
//! Pure Stellar utilities for the StellarAid donation platform: address
//! validation, stroop-denominated amount handling and asset strings, plus
//! a retry helper for network calls and the ambient config, logging and
//! error reporting plumbing used by the `stellaraid` binary.

pub mod config;
pub mod observability;
pub mod reporting;
pub mod resilience;
pub mod stellar;

pub use config::schema::AppConfig;
pub use resilience::retries::{RetryPolicy, RetryableCaller};
pub use stellar::address::{classify, AddressKind};
pub use stellar::amount::{from_stroops, to_stroops};
