//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{AppConfig, LogFormat, SecretString};
use crate::config::validation::{validate_config, ValidationError};

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "STELLARAID_";

/// Environment variable holding the server-side signing seed.
pub const ADMIN_SECRET_KEY_ENV_VAR: &str = "STELLARAID_ADMIN_SECRET_KEY";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: String, reason: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, reason } => write!(f, "Invalid {}: {}", var, reason),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn env_error(var: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Env {
        var: var.to_string(),
        reason: reason.into(),
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(env_error(var, "must be \"true\" or \"false\"")),
    }
}

/// Apply `STELLARAID_*` overrides read through `lookup`.
///
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |suffix: &str| -> Option<(String, String)> {
        let var = format!("{ENV_PREFIX}{suffix}");
        lookup(&var)
            .filter(|v| !v.trim().is_empty())
            .map(|v| (var, v))
    };

    if let Some((var, value)) = get("NETWORK") {
        config.stellar.network = value.parse().map_err(|e: String| env_error(&var, e))?;
    }
    if let Some((_, value)) = get("HORIZON_URL") {
        config.stellar.horizon_url = Some(value);
    }
    if let Some((_, value)) = get("NETWORK_PASSPHRASE") {
        config.stellar.network_passphrase = Some(value);
    }
    if let Some((var, value)) = get("ERROR_TRACKING_ENABLED") {
        config.error_tracking.enabled = parse_bool(&var, &value)?;
    }
    if let Some((_, value)) = get("ENVIRONMENT") {
        config.error_tracking.environment = Some(value);
    }
    if let Some((_, value)) = get("RELEASE") {
        config.error_tracking.release = Some(value);
    }
    if let Some((var, value)) = get("ERROR_SAMPLE_RATE") {
        config.error_tracking.sample_rate = value
            .trim()
            .parse()
            .map_err(|_| env_error(&var, "must be a number"))?;
    }
    if let Some((_, value)) = get("LOG_LEVEL") {
        config.observability.log_level = value;
    }
    if let Some((var, value)) = get("LOG_FORMAT") {
        config.observability.log_format = match value.to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => return Err(env_error(&var, "must be \"json\" or \"pretty\"")),
        };
    }
    if let Some(seed) = lookup(ADMIN_SECRET_KEY_ENV_VAR).filter(|v| !v.is_empty()) {
        config.admin_secret_key = Some(SecretString::new(seed));
    }

    Ok(())
}

/// Parse TOML, apply overrides and validate.
pub fn load_config_str<F>(content: &str, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: AppConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file plus the process environment.
///
/// Runs before logging is initialized, so it does not log.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    load_config_str(&content, |var| std::env::var(var).ok())
}

/// Build configuration from defaults plus the process environment.
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    load_config_str("", |var| std::env::var(var).ok())
}
