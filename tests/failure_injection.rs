//! Failure injection tests for the Horizon client and its retry policy.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use stellaraid_core::resilience::retries::RetryPolicy;
use stellaraid_core::stellar::horizon::HorizonClient;
use stellaraid_core::stellar::network::{NetworkConfig, StellarNetwork};

mod common;
use common::Reply;

const ROOT_BODY: &str =
    r#"{"horizon_version":"2.30.0","current_protocol_version":22,"network_passphrase":"Test SDF Network ; September 2015"}"#;

fn client_for(addr: std::net::SocketAddr, retry: RetryPolicy) -> HorizonClient {
    let network = NetworkConfig::for_network(StellarNetwork::Testnet)
        .with_horizon_url(format!("http://{}", addr));
    HorizonClient::new(network, Duration::from_secs(2), retry).unwrap()
}

#[tokio::test]
async fn test_connection_success() {
    let addr = common::start_mock_horizon(|path| async move {
        match path.as_str() {
            "/" => Reply::Json(200, ROOT_BODY.to_string()),
            _ => Reply::Json(404, "{}".to_string()),
        }
    })
    .await;

    let result = client_for(addr, RetryPolicy::no_retries()).test_connection().await;

    assert!(result.success, "unexpected failure: {:?}", result.error);
    assert_eq!(result.network, StellarNetwork::Testnet);
    assert_eq!(result.protocol_version, Some(22));
    assert_eq!(
        result.network_passphrase.as_deref(),
        Some("Test SDF Network ; September 2015")
    );
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_dropped_connections_are_retried() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let addr = common::start_mock_horizon(move |_path| {
        let counter = counter.clone();
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Reply::Drop
            } else {
                Reply::Json(200, ROOT_BODY.to_string())
            }
        }
    })
    .await;

    let result = client_for(addr, common::fast_retries(3)).test_connection().await;

    assert!(result.success, "unexpected failure: {:?}", result.error);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_http_status_is_not_retried() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let addr = common::start_mock_horizon(move |_path| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Reply::Json(503, r#"{"status":503}"#.to_string())
        }
    })
    .await;

    let result = client_for(addr, common::fast_retries(3)).test_connection().await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("HTTP error! status: 503"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_retries_exhausted_on_persistent_drop() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let addr = common::start_mock_horizon(move |_path| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Reply::Drop
        }
    })
    .await;

    let result = client_for(addr, common::fast_retries(2)).test_connection().await;

    assert!(!result.success);
    assert!(result.error.unwrap().starts_with("Network error"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_connection_refused() {
    let addr = common::closed_port().await;
    let client = client_for(addr, common::fast_retries(1));

    let result = client.test_connection().await;
    assert!(!result.success);
    assert!(result.error.unwrap().starts_with("Network error"));
    assert!(!client.is_connection_available().await);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let addr = common::start_mock_horizon(move |_path| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Reply::Json(200, "not json".to_string())
        }
    })
    .await;

    let result = client_for(addr, common::fast_retries(3)).test_connection().await;

    assert!(!result.success);
    assert!(result.error.unwrap().starts_with("Invalid response body"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_server_health() {
    let addr = common::start_mock_horizon(|path| async move {
        match path.as_str() {
            "/health" => Reply::Json(
                200,
                r#"{"database_connected":true,"core_up":true,"core_synced":true,"history_latest_ledger":1200,"core_latest_ledger":1201}"#
                    .to_string(),
            ),
            _ => Reply::Json(404, "{}".to_string()),
        }
    })
    .await;

    let health = client_for(addr, RetryPolicy::no_retries()).server_health().await;

    assert!(health.healthy);
    assert_eq!(health.history_latest_ledger, Some(1200));
    assert_eq!(health.core_latest_ledger, Some(1201));
    assert!(health.error.is_none());
}

#[tokio::test]
async fn test_server_health_unreachable() {
    let addr = common::closed_port().await;
    let health = client_for(addr, RetryPolicy::no_retries()).server_health().await;

    assert!(!health.healthy);
    assert!(health.error.is_some());
}
