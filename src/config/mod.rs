//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (STELLARAID_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → passed by reference to subsystems
//! ```
//!
//! # Design Decisions
//! - Config is built once at startup; there is no global config state
//! - All fields have defaults to allow minimal configs
//! - Secrets come only from the environment and are never serialized

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    AppConfig, ErrorTrackingConfig, LogFormat, ObservabilityConfig, RetryConfig, StellarConfig,
};
pub use validation::{validate_config, ValidationError};
