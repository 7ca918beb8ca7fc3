//! Horizon connectivity checks.
//!
//! # Responsibilities
//! - Fetch the Horizon root document and `/health` endpoint
//! - Report reachability, protocol version and latency
//! - Retry transient network failures with the configured policy

use std::time::Duration;

use futures_util::future::join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::config::schema::AppConfig;
use crate::observability::metrics;
use crate::resilience::retries::{RetryPolicy, RetryableCaller};
use crate::stellar::network::{NetworkConfig, StellarNetwork};
use crate::stellar::types::{HorizonError, HorizonResult};

/// Subset of the Horizon root document.
#[derive(Debug, Clone, Deserialize)]
pub struct HorizonRoot {
    #[serde(alias = "protocol_version")]
    pub current_protocol_version: Option<u32>,
    pub network_passphrase: Option<String>,
    pub horizon_version: Option<String>,
}

/// Subset of the `/health` response.
///
/// Older deployments report `status`; current Horizon reports the three
/// boolean flags.
#[derive(Debug, Clone, Default, Deserialize)]
struct HealthResponse {
    status: Option<String>,
    ledger_version: Option<u32>,
    history_latest_ledger: Option<u32>,
    core_latest_ledger: Option<u32>,
    database_connected: Option<bool>,
    core_up: Option<bool>,
    core_synced: Option<bool>,
}

impl HealthResponse {
    fn is_healthy(&self) -> bool {
        if let Some(status) = &self.status {
            return status == "up";
        }
        self.database_connected == Some(true)
            && self.core_up == Some(true)
            && self.core_synced == Some(true)
    }
}

/// Outcome of a connection test. Failures are data, not errors.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub network: StellarNetwork,
    pub horizon_url: String,
    pub protocol_version: Option<u32>,
    pub network_passphrase: Option<String>,
    pub error: Option<String>,
    pub latency_ms: u64,
}

/// Health summary of a Horizon server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerHealth {
    pub healthy: bool,
    pub ledger_version: Option<u32>,
    pub history_latest_ledger: Option<u32>,
    pub core_latest_ledger: Option<u32>,
    pub error: Option<String>,
}

/// HTTP client for one Horizon server.
#[derive(Debug, Clone)]
pub struct HorizonClient {
    http: reqwest::Client,
    network: NetworkConfig,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HorizonClient {
    pub fn new(
        network: NetworkConfig,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> HorizonResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stellaraid-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HorizonError::Setup(e.to_string()))?;

        Ok(Self {
            http,
            network,
            timeout,
            retry,
        })
    }

    /// Client for the network, timeout and retry policy in `config`.
    pub fn from_config(config: &AppConfig) -> HorizonResult<Self> {
        Self::new(
            config.stellar.network_config(),
            Duration::from_secs(config.stellar.request_timeout_secs),
            RetryPolicy::from(&config.retries),
        )
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.network.horizon_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> HorizonResult<T> {
        let url = self.endpoint(path);
        let timeout_ms = self.timeout.as_millis() as u64;
        let http = &self.http;
        let url = &url;

        RetryableCaller::new(self.retry.clone())
            .call(move || async move {
                let response = http
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| HorizonError::from_reqwest(e, timeout_ms))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(HorizonError::Status(status.as_u16()));
                }

                response
                    .json::<T>()
                    .await
                    .map_err(|e| HorizonError::from_reqwest(e, timeout_ms))
            })
            .await
    }

    /// Fetch the root document.
    pub async fn root(&self) -> HorizonResult<HorizonRoot> {
        self.get_json("/").await
    }

    /// Check that the server is reachable and report what it says about itself.
    pub async fn test_connection(&self) -> ConnectionTestResult {
        let start = Instant::now();
        let result = self.root().await;
        let latency_ms = start.elapsed().as_millis() as u64;
        let network = self.network.network;

        metrics::record_horizon_request(network.as_str(), result.is_ok());

        match result {
            Ok(root) => {
                tracing::info!(
                    network = %network,
                    horizon_url = %self.network.horizon_url,
                    latency_ms,
                    protocol_version = root.current_protocol_version,
                    "Horizon reachable"
                );
                ConnectionTestResult {
                    success: true,
                    network,
                    horizon_url: self.network.horizon_url.clone(),
                    protocol_version: root.current_protocol_version,
                    network_passphrase: root.network_passphrase,
                    error: None,
                    latency_ms,
                }
            }
            Err(e) => {
                tracing::warn!(
                    network = %network,
                    horizon_url = %self.network.horizon_url,
                    error = %e,
                    "Horizon connection failed"
                );
                ConnectionTestResult {
                    success: false,
                    network,
                    horizon_url: self.network.horizon_url.clone(),
                    protocol_version: None,
                    network_passphrase: None,
                    error: Some(e.to_string()),
                    latency_ms,
                }
            }
        }
    }

    /// Query `/health`.
    pub async fn server_health(&self) -> ServerHealth {
        match self.get_json::<HealthResponse>("/health").await {
            Ok(health) => ServerHealth {
                healthy: health.is_healthy(),
                ledger_version: health.ledger_version,
                history_latest_ledger: health.history_latest_ledger,
                core_latest_ledger: health.core_latest_ledger,
                error: None,
            },
            Err(e) => {
                tracing::warn!(
                    horizon_url = %self.network.horizon_url,
                    error = %e,
                    "Health check failed"
                );
                ServerHealth {
                    healthy: false,
                    error: Some(e.to_string()),
                    ..ServerHealth::default()
                }
            }
        }
    }

    pub async fn is_connection_available(&self) -> bool {
        self.test_connection().await.success
    }
}

/// Test every well-known network concurrently, using the canonical endpoints.
pub async fn test_all_connections(
    timeout: Duration,
    retry: RetryPolicy,
) -> Vec<ConnectionTestResult> {
    let checks = StellarNetwork::ALL.into_iter().map(|network| {
        let retry = retry.clone();
        async move {
            let config = NetworkConfig::for_network(network);
            match HorizonClient::new(config.clone(), timeout, retry) {
                Ok(client) => client.test_connection().await,
                Err(e) => ConnectionTestResult {
                    success: false,
                    network,
                    horizon_url: config.horizon_url,
                    protocol_version: None,
                    network_passphrase: None,
                    error: Some(e.to_string()),
                    latency_ms: 0,
                },
            }
        }
    });
    join_all(checks).await
}
