//! Asset references: the native asset or a `CODE:ISSUER` credit asset.

use serde::{Deserialize, Serialize};

use crate::stellar::address::is_valid_public_address;
use crate::stellar::types::{AssetError, AssetResult, NATIVE_ASSET_CODE};

/// Maximum length of a credit asset code (alphanum12).
pub const MAX_ASSET_CODE_LEN: usize = 12;

/// A Stellar asset reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Asset {
    /// The network's native asset (XLM). Has no issuer.
    Native,
    /// An issued asset.
    Credit { code: String, issuer: String },
}

impl Asset {
    pub fn credit(code: impl Into<String>, issuer: impl Into<String>) -> Self {
        Asset::Credit {
            code: code.into(),
            issuer: issuer.into(),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Asset::Native => NATIVE_ASSET_CODE,
            Asset::Credit { code, .. } => code,
        }
    }

    pub fn issuer(&self) -> Option<&str> {
        match self {
            Asset::Native => None,
            Asset::Credit { issuer, .. } => Some(issuer),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }

    /// Check that a credit asset's code and issuer are well formed.
    ///
    /// Parsing does not do this; an asset string only has to have the
    /// right shape.
    pub fn validate(&self) -> AssetResult<()> {
        let Asset::Credit { code, issuer } = self else {
            return Ok(());
        };
        if code.is_empty()
            || code.len() > MAX_ASSET_CODE_LEN
            || !code.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(AssetError::InvalidCode(code.clone()));
        }
        if !is_valid_public_address(issuer) {
            return Err(AssetError::InvalidIssuer(issuer.clone()));
        }
        Ok(())
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Asset::Native => f.write_str(NATIVE_ASSET_CODE),
            Asset::Credit { code, issuer } => write!(f, "{code}:{issuer}"),
        }
    }
}

impl std::str::FromStr for Asset {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_asset_string(s)
    }
}

/// Render an asset as `code` or `code:issuer`.
pub fn format_asset(code: &str, issuer: Option<&str>) -> String {
    match issuer {
        Some(issuer) if !issuer.is_empty() => format!("{code}:{issuer}"),
        _ => code.to_string(),
    }
}

/// Parse `"XLM"`, `"native"` or `"CODE:ISSUER"`.
pub fn parse_asset_string(s: &str) -> AssetResult<Asset> {
    if s == NATIVE_ASSET_CODE || s == "native" {
        return Ok(Asset::Native);
    }

    let mut parts = s.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(code), Some(issuer), None) if !code.is_empty() && !issuer.is_empty() => {
            Ok(Asset::credit(code, issuer))
        }
        _ => Err(AssetError::InvalidAssetString(s.to_string())),
    }
}
