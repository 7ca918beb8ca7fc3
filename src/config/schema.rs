//! Configuration schema definitions.
//!
//! All sections derive Serde traits and default every field, so an empty
//! file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::stellar::network::{NetworkConfig, StellarNetwork};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Network selection and Horizon access.
    pub stellar: StellarConfig,

    /// Retry policy for network calls.
    pub retries: RetryConfig,

    /// Error reporting settings.
    pub error_tracking: ErrorTrackingConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Server-side signing seed. Only ever read from the environment.
    #[serde(skip)]
    pub admin_secret_key: Option<SecretString>,
}

/// Stellar network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StellarConfig {
    /// Network to talk to.
    pub network: StellarNetwork,

    /// Horizon URL override (default: the SDF server for `network`).
    pub horizon_url: Option<String>,

    /// Passphrase override (default: the canonical one for `network`).
    pub network_passphrase: Option<String>,

    /// Per-request timeout for Horizon calls, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for StellarConfig {
    fn default() -> Self {
        Self {
            network: StellarNetwork::Testnet,
            horizon_url: None,
            network_passphrase: None,
            request_timeout_secs: 10,
        }
    }
}

impl StellarConfig {
    /// Resolve overrides against the network's canonical values.
    pub fn network_config(&self) -> NetworkConfig {
        let mut resolved = NetworkConfig::for_network(self.network);
        if let Some(url) = &self.horizon_url {
            resolved.horizon_url = url.clone();
        }
        if let Some(passphrase) = &self.network_passphrase {
            resolved.network_passphrase = passphrase.clone();
        }
        resolved
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,

    /// Upper bound on any single delay, in milliseconds.
    pub max_delay_ms: u64,

    /// Growth factor between consecutive delays.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 10_000,
            backoff_multiplier: 2.0,
        }
    }
}

/// Error tracking configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ErrorTrackingConfig {
    /// Forward captured errors to the installed reporter.
    pub enabled: bool,

    /// Deployment environment tag (e.g. "production").
    pub environment: Option<String>,

    /// Release/version tag.
    pub release: Option<String>,

    /// Fraction of events forwarded, in [0, 1].
    pub sample_rate: f64,
}

impl Default for ErrorTrackingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            environment: None,
            release: None,
            sample_rate: 1.0,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Serve Prometheus metrics.
    pub metrics_enabled: bool,

    /// Metrics listener address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// A string that never appears in `Debug` output or serialized config.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString(<redacted>)")
    }
}
