//! StrKey address validation.
//!
//! # Responsibilities
//! - Check public keys (`G...`), secret seeds (`S...`), muxed accounts
//!   (`M...`) and contract ids (`C...`)
//! - Classify an arbitrary string into exactly one address kind
//!
//! # Design Decisions
//! - Validators return `bool`, never `Result`: malformed input is expected
//! - Cheap shape checks (prefix, length) run before the checksum decode
//! - Checksum and version byte handling is delegated to `stellar-strkey`

use serde::Serialize;
use stellar_strkey::ed25519::{MuxedAccount, PrivateKey, PublicKey};
use stellar_strkey::Contract;

use crate::observability::metrics;

/// Encoded length of ed25519 keys, seeds and contract ids.
pub const ACCOUNT_ADDRESS_LEN: usize = 56;

/// Encoded length of a muxed account (key + 8-byte sub-account id).
pub const MUXED_ADDRESS_LEN: usize = 69;

/// The kind of a Stellar address, as reported by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Public,
    Muxed,
    Contract,
    Invalid,
}

impl AddressKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressKind::Public => "public",
            AddressKind::Muxed => "muxed",
            AddressKind::Contract => "contract",
            AddressKind::Invalid => "invalid",
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, AddressKind::Invalid)
    }
}

impl std::fmt::Display for AddressKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn has_shape(s: &str, prefix: char, len: usize) -> bool {
    s.len() == len && s.starts_with(prefix)
}

/// Validate an ed25519 public key (`G...`, 56 chars).
pub fn is_valid_public_address(s: &str) -> bool {
    has_shape(s, 'G', ACCOUNT_ADDRESS_LEN) && PublicKey::from_string(s).is_ok()
}

/// Validate an ed25519 secret seed (`S...`, 56 chars).
///
/// The seed itself is never logged.
pub fn is_valid_secret_seed(s: &str) -> bool {
    has_shape(s, 'S', ACCOUNT_ADDRESS_LEN) && PrivateKey::from_string(s).is_ok()
}

/// Validate a muxed account (`M...`, 69 chars).
pub fn is_valid_muxed_address(s: &str) -> bool {
    has_shape(s, 'M', MUXED_ADDRESS_LEN) && MuxedAccount::from_string(s).is_ok()
}

/// Validate a contract id (`C...`, 56 chars).
pub fn is_valid_contract_id(s: &str) -> bool {
    has_shape(s, 'C', ACCOUNT_ADDRESS_LEN) && Contract::from_string(s).is_ok()
}

/// True for any address a payment can be sent to: public, muxed or contract.
pub fn is_valid_any_address(s: &str) -> bool {
    classify(s).is_valid()
}

/// Classify `s`, checking public, muxed and contract formats in that order.
///
/// Prefix characters are disjoint, so at most one check can succeed.
/// Secret seeds classify as [`AddressKind::Invalid`].
pub fn classify(s: &str) -> AddressKind {
    let kind = if is_valid_public_address(s) {
        AddressKind::Public
    } else if is_valid_muxed_address(s) {
        AddressKind::Muxed
    } else if is_valid_contract_id(s) {
        AddressKind::Contract
    } else {
        AddressKind::Invalid
    };

    metrics::record_address_check(kind.as_str());
    kind
}

/// Like [`classify`], failing closed when no value is present.
pub fn classify_opt(s: Option<&str>) -> AddressKind {
    s.map(classify).unwrap_or(AddressKind::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLIC: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";
    const SECRET: &str = "SBU2RRGLXH3E5CQHTD3ODLDF2BWDCYUSSBLLZ5GNW7JXHDIYKXZWHOKR";
    const MUXED: &str =
        "MA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJUAAAAAAAAAAAACJUQ";
    const CONTRACT: &str = "CA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJUWDA";

    #[test]
    fn test_valid_addresses_classify() {
        assert_eq!(classify(PUBLIC), AddressKind::Public);
        assert_eq!(classify(MUXED), AddressKind::Muxed);
        assert_eq!(classify(CONTRACT), AddressKind::Contract);
        assert_eq!(classify(SECRET), AddressKind::Invalid);
        assert!(is_valid_secret_seed(SECRET));
    }

    #[test]
    fn test_prefixes_are_disjoint() {
        assert!(is_valid_public_address(PUBLIC));
        assert!(!is_valid_secret_seed(PUBLIC));
        assert!(!is_valid_muxed_address(PUBLIC));
        assert!(!is_valid_contract_id(PUBLIC));

        assert!(!is_valid_public_address(CONTRACT));
        assert!(!is_valid_public_address(MUXED));
        assert!(!is_valid_public_address(SECRET));
    }

    #[test]
    fn test_wrong_length_rejected() {
        for s in ["", "G", &PUBLIC[..55], format!("{}A", PUBLIC).as_str(), &MUXED[..68]] {
            assert!(!is_valid_public_address(s), "{s}");
            assert!(!is_valid_secret_seed(s), "{s}");
            assert!(!is_valid_muxed_address(s), "{s}");
            assert!(!is_valid_contract_id(s), "{s}");
            assert_eq!(classify(s), AddressKind::Invalid);
        }
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let bad = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGA";
        assert_eq!(bad.len(), ACCOUNT_ADDRESS_LEN);
        assert!(!is_valid_public_address(bad));
        assert_eq!(classify(bad), AddressKind::Invalid);
    }

    #[test]
    fn test_prefix_swap_breaks_version_byte() {
        // Same payload and checksum, different leading character.
        let swapped = format!("C{}", &PUBLIC[1..]);
        assert!(!is_valid_contract_id(&swapped));
    }

    #[test]
    fn test_garbage_does_not_panic() {
        let junk = "G".to_string() + &"!".repeat(55);
        assert!(!is_valid_public_address(&junk));
        let lower = PUBLIC.to_lowercase();
        assert!(!is_valid_public_address(&lower));
        // Multi-byte chars: byte length 56 but not a StrKey.
        let wide = format!("G{}", "é".repeat(27) + "A");
        assert!(!is_valid_public_address(&wide));
    }

    #[test]
    fn test_classify_opt_fails_closed() {
        assert_eq!(classify_opt(None), AddressKind::Invalid);
        assert_eq!(classify_opt(Some(PUBLIC)), AddressKind::Public);
    }

    #[test]
    fn test_kind_display_and_serde() {
        assert_eq!(AddressKind::Muxed.to_string(), "muxed");
        assert_eq!(serde_json::to_string(&AddressKind::Invalid).unwrap(), "\"invalid\"");
        assert!(is_valid_any_address(CONTRACT));
        assert!(!is_valid_any_address(SECRET));
    }
}
