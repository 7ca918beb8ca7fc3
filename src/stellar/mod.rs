//! Stellar utility subsystem.
//!
//! # Data Flow
//! ```text
//! User input (address, amount, asset string)
//!     → address.rs (StrKey shape + checksum validation)
//!     → amount.rs (decimal ⇄ stroops, display formatting)
//!     → asset.rs (native / CODE:ISSUER references)
//!
//! Network access (host-driven):
//!     → network.rs (endpoints and passphrases)
//!     → horizon.rs (connectivity checks, retried via resilience)
//! ```
//!
//! # Design Decisions
//! - Validation and conversion are pure and synchronous
//! - Validators fail closed with `false`; conversions return typed errors
//! - Amounts never pass through floating point

pub mod address;
pub mod amount;
pub mod asset;
pub mod horizon;
pub mod network;
pub mod types;

pub use address::{classify, AddressKind};
pub use amount::{from_stroops, to_stroops, Stroops};
pub use asset::{parse_asset_string, Asset};
pub use horizon::HorizonClient;
pub use network::{NetworkConfig, StellarNetwork};
pub use types::{AmountError, AssetError, HorizonError};
