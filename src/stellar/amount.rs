//! Amount conversion and display formatting.
//!
//! # Responsibilities
//! - Convert human decimal amounts to stroops and back, losslessly
//! - Format amounts for display (grouping, bounded fraction digits)
//! - Shorten addresses for display
//!
//! # Design Decisions
//! - Decimal strings are parsed digit by digit; no floating point anywhere
//! - Rounding is half away from zero at the last kept fraction digit
//! - Stroop values are carried as `u128` and exchanged as strings

use std::fmt;
use std::str::FromStr;

use crate::stellar::types::{
    AmountError, AmountResult, BASE_FEE_STROOPS, NATIVE_ASSET_CODE, STELLAR_DECIMALS,
    STROOPS_PER_UNIT,
};

/// Largest fraction-digit count [`format_amount`] accepts.
pub const MAX_FORMAT_DECIMALS: usize = 20;

/// A decimal number split into sign, integer digits and fraction digits.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedDecimal {
    negative: bool,
    /// Integer digits without leading zeros; empty means zero.
    int_digits: String,
    frac_digits: String,
}

impl ParsedDecimal {
    fn parse(input: &str) -> AmountResult<Self> {
        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(AmountError::invalid(input, "not a decimal number"));
        }
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(AmountError::invalid(input, "not a decimal number"));
        }

        Ok(Self {
            negative,
            int_digits: int_part.trim_start_matches('0').to_string(),
            frac_digits: frac_part.to_string(),
        })
    }

    fn is_zero(&self) -> bool {
        self.int_digits.is_empty() && self.frac_digits.bytes().all(|b| b == b'0')
    }

    /// Round the magnitude to `places` fraction digits, half away from zero.
    ///
    /// Returns the integer digits (possibly empty) and exactly `places`
    /// fraction digits.
    fn round_to(&self, places: usize) -> (String, String) {
        let mut frac = self.frac_digits.clone();
        if frac.len() < places + 1 {
            frac.extend(std::iter::repeat('0').take(places + 1 - frac.len()));
        }
        let round_up = frac.as_bytes()[places] >= b'5';

        let mut digits: Vec<u8> = self
            .int_digits
            .bytes()
            .chain(frac.bytes().take(places))
            .collect();

        if round_up {
            let mut carry = true;
            for d in digits.iter_mut().rev() {
                if *d == b'9' {
                    *d = b'0';
                } else {
                    *d += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                digits.insert(0, b'1');
            }
        }

        let split = digits.len() - places;
        let frac_out = String::from_utf8_lossy(&digits[split..]).into_owned();
        let int_out = String::from_utf8_lossy(&digits[..split])
            .trim_start_matches('0')
            .to_string();
        (int_out, frac_out)
    }
}

/// An amount in stroops, the smallest unit of a Stellar asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Stroops(pub u128);

impl Stroops {
    /// Parse a non-negative decimal amount (e.g. `"100.5"`).
    pub fn from_decimal(amount: &str) -> AmountResult<Self> {
        let parsed = ParsedDecimal::parse(amount)?;
        if parsed.negative && !parsed.is_zero() {
            return Err(AmountError::invalid(amount, "must be non-negative"));
        }

        let (int_digits, frac_digits) = parsed.round_to(STELLAR_DECIMALS);
        let combined = format!("{int_digits}{frac_digits}");
        let combined = combined.trim_start_matches('0');
        if combined.is_empty() {
            return Ok(Stroops(0));
        }
        combined
            .parse::<u128>()
            .map(Stroops)
            .map_err(|_| AmountError::invalid(amount, "out of range"))
    }

    /// Render as a decimal amount without insignificant zeros.
    pub fn to_decimal(&self) -> String {
        let whole = self.0 / STROOPS_PER_UNIT;
        let frac = self.0 % STROOPS_PER_UNIT;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{:0width$}", frac, width = STELLAR_DECIMALS);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }
}

impl FromStr for Stroops {
    type Err = AmountError;

    /// Parse a non-negative integer stroop count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('-') {
            return Err(AmountError::invalid(s, "must be non-negative"));
        }
        trimmed
            .parse::<u128>()
            .map(Stroops)
            .map_err(|_| AmountError::invalid(s, "not a non-negative integer"))
    }
}

impl fmt::Display for Stroops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert a decimal amount to stroops, returned as an integer string.
///
/// `to_stroops("100.5") == "1005000000"`.
pub fn to_stroops(amount: &str) -> AmountResult<String> {
    Stroops::from_decimal(amount).map(|s| s.to_string())
}

/// Convert a stroop count back to a trimmed decimal amount.
///
/// `from_stroops("1000000000") == "100"`.
pub fn from_stroops(units: &str) -> AmountResult<String> {
    units.parse::<Stroops>().map(|s| s.to_decimal())
}

/// Format an amount with `,` grouping and at most `decimals` fraction digits.
///
/// `decimals` above [`MAX_FORMAT_DECIMALS`] is rejected.
pub fn format_amount(amount: &str, decimals: usize) -> AmountResult<String> {
    if decimals > MAX_FORMAT_DECIMALS {
        return Err(AmountError::invalid(amount, "too many fraction digits"));
    }
    let parsed = ParsedDecimal::parse(amount)?;
    let (int_digits, frac_digits) = parsed.round_to(decimals);
    let frac = frac_digits.trim_end_matches('0');

    let is_zero = int_digits.is_empty() && frac.is_empty();
    let mut out = String::new();
    if parsed.negative && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_digits));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    Ok(out)
}

/// [`format_amount`] at full Stellar precision.
pub fn format_amount_default(amount: &str) -> AmountResult<String> {
    format_amount(amount, STELLAR_DECIMALS)
}

/// Format an amount followed by a currency code, e.g. `"1,000.5 XLM"`.
pub fn format_currency(amount: &str, currency: &str, decimals: usize) -> AmountResult<String> {
    Ok(format!("{} {}", format_amount(amount, decimals)?, currency))
}

/// Format a fee given in stroops as a native-asset amount.
pub fn format_fee(stroops: &str) -> AmountResult<String> {
    Ok(format!("{} {}", from_stroops(stroops)?, NATIVE_ASSET_CODE))
}

/// Base fee per operation, in stroops.
pub fn base_fee() -> String {
    BASE_FEE_STROOPS.to_string()
}

fn group_thousands(digits: &str) -> String {
    if digits.is_empty() {
        return "0".to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Shorten an address to `first(start_chars)...last(end_chars)`.
///
/// Addresses of at most `start_chars + end_chars + 3` characters are
/// returned unchanged.
pub fn truncate_address(address: &str, start_chars: usize, end_chars: usize) -> String {
    let len = address.chars().count();
    if len <= start_chars.saturating_add(end_chars).saturating_add(3) {
        return address.to_string();
    }
    let head: String = address.chars().take(start_chars).collect();
    let tail: String = address.chars().skip(len - end_chars).collect();
    format!("{head}...{tail}")
}

/// [`truncate_address`] keeping four characters at each end.
pub fn truncate_address_default(address: &str) -> String {
    truncate_address(address, 4, 4)
}
