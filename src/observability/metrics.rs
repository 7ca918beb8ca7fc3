//! Metrics collection and exposition.
//!
//! # Metrics
//! - `stellaraid_address_checks_total` (counter): classifications by `kind`
//! - `stellaraid_retry_attempts_total` (counter): retries scheduled
//! - `stellaraid_retry_exhausted_total` (counter): loops that ran out of retries
//! - `stellaraid_horizon_requests_total` (counter): connection checks by
//!   `network` and `outcome`

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_address_check(kind: &'static str) {
    metrics::counter!("stellaraid_address_checks_total", "kind" => kind).increment(1);
}

pub fn record_retry_attempt() {
    metrics::counter!("stellaraid_retry_attempts_total").increment(1);
}

pub fn record_retry_exhausted() {
    metrics::counter!("stellaraid_retry_exhausted_total").increment(1);
}

pub fn record_horizon_request(network: &'static str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!(
        "stellaraid_horizon_requests_total",
        "network" => network,
        "outcome" => outcome
    )
    .increment(1);
}
