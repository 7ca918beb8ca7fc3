//! End-to-end checks through the crate's root exports.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use stellaraid_core::stellar::amount::truncate_address;
use stellaraid_core::stellar::asset::{parse_asset_string, Asset};
use stellaraid_core::{
    classify, from_stroops, to_stroops, AddressKind, RetryPolicy, RetryableCaller,
};

const PUBLIC: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";

#[test]
fn test_donation_amount_flow() {
    let stroops = to_stroops("100.5").unwrap();
    assert_eq!(stroops, "1005000000");
    assert_eq!(from_stroops(&stroops).unwrap(), "100.5");
    assert_eq!(from_stroops("1000000000").unwrap(), "100");

    assert!(to_stroops("-5").is_err());
    assert!(to_stroops("abc").is_err());
}

#[test]
fn test_recipient_checks() {
    assert_eq!(classify(PUBLIC), AddressKind::Public);
    assert_eq!(classify(&PUBLIC[..55]), AddressKind::Invalid);
    assert_eq!(truncate_address(PUBLIC, 4, 4), "GA7Q...VSGZ");

    let asset = parse_asset_string(&format!("USDC:{}", PUBLIC)).unwrap();
    assert_eq!(asset, Asset::credit("USDC", PUBLIC));
    assert!(asset.validate().is_ok());
    assert_eq!(parse_asset_string("XLM").unwrap(), Asset::Native);
}

#[tokio::test(start_paused = true)]
async fn test_caller_recovers_from_timeouts() {
    let calls = Arc::new(AtomicU32::new(0));
    let retries = Arc::new(AtomicU32::new(0));
    let seen = retries.clone();

    let caller = RetryableCaller::new(RetryPolicy {
        max_retries: 3,
        initial_delay: Duration::from_millis(100),
        max_delay: Duration::from_secs(1),
        backoff_multiplier: 2.0,
    })
    .on_retry(move |_, _| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    let result: Result<&str, String> = caller
        .call(|| {
            let calls = calls.clone();
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err("connect ETIMEDOUT".to_string())
                } else {
                    Ok("submitted")
                }
            }
        })
        .await;

    assert_eq!(result, Ok("submitted"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(retries.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_caller_does_not_retry_rejections() {
    let calls = Arc::new(AtomicU32::new(0));
    let caller = RetryableCaller::new(RetryPolicy::default());

    let result: Result<(), String> = caller
        .call(|| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("op_underfunded".to_string())
            }
        })
        .await;

    assert_eq!(result, Err("op_underfunded".to_string()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
