//! `stellaraid` command-line tool.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI args ──▶ config (file + STELLARAID_* env) ──▶ logging / metrics / error tracker
//!                                                       │
//!                 ┌─────────────────────────────────────┼──────────────────────────┐
//!                 ▼                                     ▼                          ▼
//!          stellar::address                     stellar::amount           stellar::horizon
//!          stellar::asset                                                 (resilience::retries)
//! ```
//!
//! Every command prints JSON on stdout. Failures are reported through the
//! error tracker and printed on stderr.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use stellaraid_core::config::{load_config, load_from_env, AppConfig};
use stellaraid_core::observability::{logging, metrics};
use stellaraid_core::reporting::{ErrorContext, ErrorTracker, TracingReporter};
use stellaraid_core::resilience::retries::RetryPolicy;
use stellaraid_core::stellar::address::{self, classify};
use stellaraid_core::stellar::amount;
use stellaraid_core::stellar::asset::parse_asset_string;
use stellaraid_core::stellar::horizon::{test_all_connections, HorizonClient};
use stellaraid_core::stellar::types::STELLAR_DECIMALS;

#[derive(Parser)]
#[command(name = "stellaraid")]
#[command(
    about = "Stellar address, amount and Horizon utilities for StellarAid",
    long_about = None
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify and validate a Stellar address
    Address { address: String },
    /// Convert a decimal amount to stroops
    ToStroops {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Convert stroops to a decimal amount
    FromStroops {
        #[arg(allow_hyphen_values = true)]
        stroops: String,
    },
    /// Format an amount for display
    Format {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Maximum fraction digits
        #[arg(short, long, default_value_t = STELLAR_DECIMALS)]
        decimals: usize,
        /// Currency code appended to the amount
        #[arg(long)]
        currency: Option<String>,
    },
    /// Parse an asset string ("XLM", "native" or "CODE:ISSUER")
    Asset { asset: String },
    /// Test connectivity to the configured Horizon server
    Network {
        /// Test every well-known network instead
        #[arg(long)]
        all: bool,
    },
    /// Query the configured Horizon server's health endpoint
    Health,
    /// Validate the configuration and print it
    CheckConfig,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Address { .. } => "address",
            Commands::ToStroops { .. } => "to-stroops",
            Commands::FromStroops { .. } => "from-stroops",
            Commands::Format { .. } => "format",
            Commands::Asset { .. } => "asset",
            Commands::Network { .. } => "network",
            Commands::Health => "health",
            Commands::CheckConfig => "check-config",
        }
    }
}

/// Command output and whether it represents success.
struct Outcome {
    output: Value,
    ok: bool,
}

impl Outcome {
    fn ok(output: Value) -> Self {
        Self { output, ok: true }
    }
}

async fn run(
    command: &Commands,
    config: &AppConfig,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    let outcome = match command {
        Commands::Address { address: value } => {
            let kind = classify(value);
            Outcome::ok(json!({
                "address": amount::truncate_address_default(value),
                "kind": kind,
                "public": address::is_valid_public_address(value),
                "secret_seed": address::is_valid_secret_seed(value),
                "muxed": address::is_valid_muxed_address(value),
                "contract": address::is_valid_contract_id(value),
            }))
        }
        Commands::ToStroops { amount: value } => Outcome::ok(json!({
            "amount": value,
            "stroops": amount::to_stroops(value)?,
        })),
        Commands::FromStroops { stroops } => Outcome::ok(json!({
            "stroops": stroops,
            "amount": amount::from_stroops(stroops)?,
        })),
        Commands::Format {
            amount: value,
            decimals,
            currency,
        } => {
            let formatted = match currency {
                Some(code) => amount::format_currency(value, code, *decimals)?,
                None => amount::format_amount(value, *decimals)?,
            };
            Outcome::ok(json!({ "formatted": formatted }))
        }
        Commands::Asset { asset } => {
            let parsed = parse_asset_string(asset)?;
            let valid = parsed.validate().is_ok();
            Outcome::ok(json!({
                "asset": parsed,
                "display": parsed.to_string(),
                "valid": valid,
            }))
        }
        Commands::Network { all: true } => {
            let results = test_all_connections(
                Duration::from_secs(config.stellar.request_timeout_secs),
                RetryPolicy::from(&config.retries),
            )
            .await;
            let ok = results.iter().all(|r| r.success);
            Outcome {
                output: serde_json::to_value(results)?,
                ok,
            }
        }
        Commands::Network { all: false } => {
            let result = HorizonClient::from_config(config)?.test_connection().await;
            Outcome {
                ok: result.success,
                output: serde_json::to_value(result)?,
            }
        }
        Commands::Health => {
            let health = HorizonClient::from_config(config)?.server_health().await;
            Outcome {
                ok: health.healthy,
                output: serde_json::to_value(health)?,
            }
        }
        Commands::CheckConfig => Outcome::ok(json!({
            "config": config,
            "network": config.stellar.network_config(),
            "admin_secret_key": config.admin_secret_key.is_some(),
        })),
    };
    Ok(outcome)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => load_config(path),
        None => load_from_env(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("Warning: logging not initialized: {}", e);
    }

    tracing::info!(
        path = ?cli.config,
        network = %config.stellar.network,
        horizon_url = %config.stellar.network_config().horizon_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let tracker = ErrorTracker::new(
        config.error_tracking.clone(),
        Some(Arc::new(TracingReporter)),
    );

    match run(&cli.command, &config).await {
        Ok(outcome) => {
            match serde_json::to_string_pretty(&outcome.output) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            if outcome.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            let mut context = ErrorContext::new();
            context.insert("command".to_string(), json!(cli.command.name()));
            tracker.capture_exception(&*e, context);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
