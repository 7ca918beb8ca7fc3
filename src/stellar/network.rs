//! Stellar network identities: Horizon endpoints and passphrases.

use serde::{Deserialize, Serialize};

/// A well-known Stellar network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StellarNetwork {
    #[default]
    Testnet,
    #[serde(alias = "mainnet")]
    Public,
    Futurenet,
}

impl StellarNetwork {
    pub const ALL: [StellarNetwork; 3] = [
        StellarNetwork::Testnet,
        StellarNetwork::Public,
        StellarNetwork::Futurenet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StellarNetwork::Testnet => "testnet",
            StellarNetwork::Public => "public",
            StellarNetwork::Futurenet => "futurenet",
        }
    }

    /// SDF-operated Horizon server for this network.
    pub fn horizon_url(&self) -> &'static str {
        match self {
            StellarNetwork::Testnet => "https://horizon-testnet.stellar.org",
            StellarNetwork::Public => "https://horizon.stellar.org",
            StellarNetwork::Futurenet => "https://horizon-futurenet.stellar.org",
        }
    }

    pub fn passphrase(&self) -> &'static str {
        match self {
            StellarNetwork::Testnet => "Test SDF Network ; September 2015",
            StellarNetwork::Public => "Public Global Stellar Network ; September 2015",
            StellarNetwork::Futurenet => "Test SDF Future Network ; October 2022",
        }
    }
}

impl std::fmt::Display for StellarNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StellarNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "testnet" => Ok(StellarNetwork::Testnet),
            "public" | "mainnet" => Ok(StellarNetwork::Public),
            "futurenet" => Ok(StellarNetwork::Futurenet),
            other => Err(format!(
                "unknown network '{other}', expected one of: testnet | public | futurenet"
            )),
        }
    }
}

/// Resolved connection parameters for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConfig {
    pub network: StellarNetwork,
    pub horizon_url: String,
    pub network_passphrase: String,
}

impl NetworkConfig {
    /// Canonical endpoint and passphrase for `network`.
    pub fn for_network(network: StellarNetwork) -> Self {
        Self {
            network,
            horizon_url: network.horizon_url().to_string(),
            network_passphrase: network.passphrase().to_string(),
        }
    }

    pub fn with_horizon_url(mut self, url: impl Into<String>) -> Self {
        self.horizon_url = url.into();
        self
    }
}
