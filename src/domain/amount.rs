//! Amount types
//!
//! Domain primitives for native-currency amounts. Users type decimal ether,
//! the chain only ever sees integer wei. Conversion between the two is exact:
//! the decimal string is split into whole and fractional digits and folded
//! into a `U256` with checked arithmetic, never floating point.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal places of the native currency (1 ether = 10^18 wei)
pub const ETHER_DECIMALS: u32 = 18;

/// 10^18 fits in a single 64-bit limb
const WEI_PER_ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Errors that can occur when creating an amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must be positive (got {0})")]
    NotPositive(String),

    #[error("Amount has too many decimal places (max {ETHER_DECIMALS}, got {0})")]
    TooManyDecimals(u32),

    #[error("Amount does not fit in the base unit range")]
    Overflow,

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

// =========================================================================
// Wei
// =========================================================================

/// Integer amount in the chain's base unit.
///
/// Serialized as a decimal string because JSON numbers cannot carry 256 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Wei(U256);

impl Wei {
    pub const ZERO: Wei = Wei(U256::ZERO);

    pub fn new(value: u128) -> Self {
        Self(U256::from(value))
    }

    pub fn value(&self) -> U256 {
        self.0
    }

    /// Decimal ether string, always with at least one fractional digit.
    ///
    /// Inverse of [`EtherAmount::to_wei`]: parsing the result gives back the
    /// same wei.
    pub fn format_ether(&self) -> String {
        let whole = self.0 / WEI_PER_ETHER;
        // remainder < 10^18, so the low limb holds all of it
        let fraction = (self.0 % WEI_PER_ETHER).as_limbs()[0];
        let fraction = format!("{:018}", fraction);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            format!("{whole}.0")
        } else {
            format!("{whole}.{fraction}")
        }
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Wei {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::ParseError(format!("not a wei amount: {s}")));
        }
        U256::from_str_radix(digits, 10)
            .map(Self)
            .map_err(|_| AmountError::Overflow)
    }
}

impl TryFrom<String> for Wei {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Wei::from_str(&value)
    }
}

impl From<Wei> for String {
    fn from(wei: Wei) -> Self {
        wei.0.to_string()
    }
}

impl From<U256> for Wei {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

// =========================================================================
// EtherAmount
// =========================================================================

/// A validated, user-entered amount of ether.
///
/// # Invariants
/// - Value is always positive (> 0)
/// - At most 18 decimal places
/// - Converts to [`Wei`] without remainder or overflow
///
/// # Example
/// ```
/// use fund_me_client::domain::{EtherAmount, Wei};
///
/// let amount: EtherAmount = "0.01".parse().unwrap();
/// assert_eq!(amount.to_wei(), Wei::new(10_000_000_000_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EtherAmount {
    wei: Wei,
}

impl EtherAmount {
    pub fn to_wei(&self) -> Wei {
        self.wei
    }
}

impl fmt::Display for EtherAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ether = self.wei.format_ether();
        write!(f, "{}", ether.strip_suffix(".0").unwrap_or(&ether))
    }
}

impl FromStr for EtherAmount {
    type Err = AmountError;

    /// Accepts `[+-]digits[.digits]`, with at most 18 fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (negative, unsigned) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let well_formed = !(whole.is_empty() && fraction.is_empty())
            && whole.bytes().all(|b| b.is_ascii_digit())
            && fraction.bytes().all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(AmountError::ParseError(format!(
                "expected a decimal number, got {input:?}"
            )));
        }

        let fraction_digits = fraction.len() as u32;
        if fraction_digits > ETHER_DECIMALS {
            return Err(AmountError::TooManyDecimals(fraction_digits));
        }

        let whole = if whole.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(whole, 10).map_err(|_| AmountError::Overflow)?
        };
        // right-pad to 18 digits; at most 10^18 - 1, fits in u64
        let fraction: u64 = format!("{fraction:0<18}")
            .parse()
            .map_err(|_| AmountError::ParseError(input.to_string()))?;

        let wei = whole
            .checked_mul(WEI_PER_ETHER)
            .and_then(|wei| wei.checked_add(U256::from(fraction)))
            .ok_or(AmountError::Overflow)?;

        if negative || wei.is_zero() {
            return Err(AmountError::NotPositive(input.to_string()));
        }
        Ok(Self { wei: Wei(wei) })
    }
}

impl TryFrom<String> for EtherAmount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EtherAmount::from_str(&value)
    }
}

impl From<EtherAmount> for String {
    fn from(amount: EtherAmount) -> Self {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_one_hundredth_ether_to_wei() {
        let amount: EtherAmount = "0.01".parse().unwrap();
        assert_eq!(amount.to_wei(), Wei::new(10_000_000_000_000_000));
    }

    #[test]
    fn test_whole_ether_to_wei() {
        let amount: EtherAmount = "3".parse().unwrap();
        assert_eq!(amount.to_wei(), Wei::new(3_000_000_000_000_000_000));
        assert_eq!(amount.to_string(), "3");
    }

    #[test]
    fn test_smallest_unit() {
        let amount: EtherAmount = "0.000000000000000001".parse().unwrap();
        assert_eq!(amount.to_wei(), Wei::new(1));
    }

    #[test]
    fn test_wide_amounts_stay_exact() {
        let amount: EtherAmount = "100000000000.000000000000000001".parse().unwrap();
        assert_eq!(
            amount.to_wei(),
            Wei::new(100_000_000_000_000_000_000_000_000_001)
        );
        assert_eq!(
            amount.to_wei().format_ether(),
            "100000000000.000000000000000001"
        );
    }

    #[test]
    fn test_leading_and_trailing_dot() {
        assert_eq!(
            ".5".parse::<EtherAmount>().unwrap().to_wei(),
            Wei::new(500_000_000_000_000_000)
        );
        assert_eq!(
            "5.".parse::<EtherAmount>().unwrap().to_wei(),
            Wei::new(5_000_000_000_000_000_000)
        );
        assert!(".".parse::<EtherAmount>().is_err());
    }

    #[test]
    fn test_zero_rejected() {
        for input in ["0", "0.000", "+0"] {
            assert!(matches!(
                input.parse::<EtherAmount>(),
                Err(AmountError::NotPositive(_))
            ));
        }
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            "-0.5".parse::<EtherAmount>(),
            Err(AmountError::NotPositive(_))
        ));
    }

    #[test]
    fn test_too_many_decimals() {
        let result = "0.0000000000000000001".parse::<EtherAmount>();
        assert_eq!(result, Err(AmountError::TooManyDecimals(19)));
    }

    #[test]
    fn test_overflow() {
        let huge = "9".repeat(80);
        assert_eq!(huge.parse::<EtherAmount>(), Err(AmountError::Overflow));
    }

    #[test]
    fn test_foreign_characters_rejected() {
        for input in ["1e-2", "1_000", "ten", "   ", "", "1.2.3", "1,5", "--1", "0x10", " 1 000"] {
            assert!(
                matches!(input.parse::<EtherAmount>(), Err(AmountError::ParseError(_))),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn test_display_normalizes() {
        let amount: EtherAmount = "001.2500".parse().unwrap();
        assert_eq!(amount.to_string(), "1.25");
    }

    #[test]
    fn test_serde_as_string() {
        let amount: EtherAmount = serde_json::from_str("\"0.01\"").unwrap();
        assert_eq!(amount.to_wei(), Wei::new(10_000_000_000_000_000));
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"0.01\"");
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(Wei::ZERO.format_ether(), "0.0");
        assert_eq!(Wei::new(10_000_000_000_000_000).format_ether(), "0.01");
        assert_eq!(Wei::new(2_000_000_000_000_000_000).format_ether(), "2.0");
        assert_eq!(Wei::new(1).format_ether(), "0.000000000000000001");
        assert_eq!(
            Wei::from(U256::MAX).format_ether(),
            "115792089237316195423570985008687907853269984665640564039457.584007913129639935"
        );
    }

    #[test]
    fn test_wei_serde_as_decimal_string() {
        let wei = Wei::new(u128::MAX);
        let json = serde_json::to_string(&wei).unwrap();
        assert_eq!(json, format!("\"{}\"", u128::MAX));
        let back: Wei = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wei);
    }

    /// Canonical spelling of a decimal: no leading zeros, no trailing
    /// fractional zeros, `.0` when there is no fraction.
    fn canonical(whole: &str, fraction: &str) -> String {
        let whole = whole.trim_start_matches('0');
        let fraction = fraction.trim_end_matches('0');
        format!(
            "{}.{}",
            if whole.is_empty() { "0" } else { whole },
            if fraction.is_empty() { "0" } else { fraction }
        )
    }

    proptest! {
        #[test]
        fn prop_wei_round_trips_exactly(
            whole in "[0-9]{1,30}",
            fraction in "[0-9]{0,18}",
        ) {
            let input = if fraction.is_empty() {
                whole.clone()
            } else {
                format!("{whole}.{fraction}")
            };
            let expected = canonical(&whole, &fraction);
            prop_assume!(expected != "0.0");

            let amount: EtherAmount = input.parse().unwrap();
            let formatted = amount.to_wei().format_ether();
            prop_assert_eq!(&formatted, &expected);

            let reparsed: EtherAmount = formatted.parse().unwrap();
            prop_assert_eq!(reparsed.to_wei(), amount.to_wei());
        }
    }
}
