//! Stellar-specific constants and error definitions.

use thiserror::Error;

/// Stellar amounts carry seven fraction digits for every asset.
pub const STELLAR_DECIMALS: usize = 7;

/// One whole unit expressed in stroops.
pub const STROOPS_PER_UNIT: u128 = 10_000_000;

/// Network minimum fee per operation, in stroops.
pub const BASE_FEE_STROOPS: u32 = 100;

/// Reserved code of the native asset.
pub const NATIVE_ASSET_CODE: &str = "XLM";

/// Errors from amount parsing and conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Input is not a (non-negative) decimal or integer amount.
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: &'static str },
}

impl AmountError {
    pub(crate) fn invalid(input: &str, reason: &'static str) -> Self {
        AmountError::InvalidAmount {
            input: input.to_string(),
            reason,
        }
    }
}

/// Result type for amount operations.
pub type AmountResult<T> = Result<T, AmountError>;

/// Errors from asset string handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Not `XLM`/`native` and not a `CODE:ISSUER` pair.
    #[error("Invalid asset string '{0}': expected \"CODE:ISSUER\" or \"XLM\"")]
    InvalidAssetString(String),

    /// Asset code is empty, too long or not alphanumeric.
    #[error("Invalid asset code '{0}'")]
    InvalidCode(String),

    /// Issuer is not a valid public address.
    #[error("Invalid asset issuer '{0}'")]
    InvalidIssuer(String),
}

/// Result type for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors that can occur while talking to a Horizon server.
///
/// Transport failures are worded so that they classify as retryable
/// (see [`crate::resilience::retries::is_retryable_error`]); HTTP status
/// and decode failures do not.
#[derive(Debug, Error)]
pub enum HorizonError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("Network error: {0}")]
    Network(String),

    /// No response within the configured request timeout.
    #[error("Request timeout after {0} ms")]
    Timeout(u64),

    /// Server answered with a non-success status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Response body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Client could not be constructed.
    #[error("Client setup failed: {0}")]
    Setup(String),
}

impl HorizonError {
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            HorizonError::Timeout(timeout_ms)
        } else if e.is_decode() {
            HorizonError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            HorizonError::Status(status.as_u16())
        } else if e.is_builder() {
            HorizonError::Setup(e.to_string())
        } else {
            HorizonError::Network(e.to_string())
        }
    }
}

/// Result type for Horizon operations.
pub type HorizonResult<T> = Result<T, HorizonError>;
