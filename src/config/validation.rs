//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, sample rate in [0, 1])
//! - Check URLs and addresses are well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is handed to any subsystem

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::stellar::address::is_valid_secret_seed;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("admin secret key is not a valid Stellar secret seed")]
    InvalidSecretSeed,
}

fn check_http_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match url::Url::parse(value) {
        Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
        Ok(u) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", u.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let stellar = &config.stellar;
    if let Some(url) = &stellar.horizon_url {
        check_http_url("stellar.horizon_url", url, &mut errors);
    }
    if matches!(&stellar.network_passphrase, Some(p) if p.trim().is_empty()) {
        errors.push(ValidationError::Empty {
            field: "stellar.network_passphrase",
        });
    }
    if stellar.request_timeout_secs == 0 {
        errors.push(ValidationError::OutOfRange {
            field: "stellar.request_timeout_secs",
            reason: "must be greater than 0".to_string(),
        });
    }

    let retries = &config.retries;
    if !(retries.backoff_multiplier.is_finite() && retries.backoff_multiplier >= 1.0) {
        errors.push(ValidationError::OutOfRange {
            field: "retries.backoff_multiplier",
            reason: format!("must be >= 1, got {}", retries.backoff_multiplier),
        });
    }
    if retries.initial_delay_ms > retries.max_delay_ms {
        errors.push(ValidationError::OutOfRange {
            field: "retries.initial_delay_ms",
            reason: format!(
                "must not exceed retries.max_delay_ms ({} > {})",
                retries.initial_delay_ms, retries.max_delay_ms
            ),
        });
    }

    let sample_rate = config.error_tracking.sample_rate;
    if !(0.0..=1.0).contains(&sample_rate) {
        errors.push(ValidationError::OutOfRange {
            field: "error_tracking.sample_rate",
            reason: format!("must be within [0, 1], got {}", sample_rate),
        });
    }

    let observability = &config.observability;
    if observability.log_level.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "observability.log_level",
        });
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::OutOfRange {
            field: "observability.metrics_address",
            reason: format!("'{}' is not a socket address", observability.metrics_address),
        });
    }

    if let Some(seed) = &config.admin_secret_key {
        if !is_valid_secret_seed(seed.expose()) {
            errors.push(ValidationError::InvalidSecretSeed);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
