//! Amount type for handling monetary values in Indonesian Rupiah.
//!
//! The backend speaks plain JSON numbers, so `Amount` serializes as a number.
//! Display follows the id-ID convention used throughout the app: an `Rp`
//! prefix, `.` as the thousands separator and `,` as the decimal separator.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

/// The placeholder rendered instead of an amount when balances are hidden.
pub const MASKED: &str = "Rp.••••••";

/// Represents a Rupiah amount.
///
/// This type wraps `Decimal`. Parsing accepts either a plain number
/// (`50000`, `-1500.25`) or the formatted style shown by the app
/// (`Rp 50.000`, `-Rp 1.500.000,25`).
///
/// # Examples
///
/// Parsing a formatted amount:
/// ```
/// # use duit::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("Rp 1.500.000").unwrap();
/// assert_eq!(amount.to_string(), "Rp 1.500.000");
/// ```
///
/// Parsing a plain number:
/// ```
/// # use duit::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("50000").unwrap();
/// assert_eq!(amount.to_string(), "Rp 50.000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// An amount of exactly zero.
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.value().is_sign_negative() && !self.is_zero()
    }

    /// Renders the amount, or the masked placeholder when `show_balance` is
    /// false.
    pub fn display_or_masked(&self, show_balance: bool) -> String {
        if show_balance {
            self.to_string()
        } else {
            MASKED.to_string()
        }
    }

    /// Renders the amount in the abbreviated form used where space is tight:
    /// `Rp 2.1M` for billions, `Rp 1.5Jt` for millions, `Rp 500rb` for
    /// thousands.
    pub fn compact(&self) -> String {
        let v = self.value.to_f64().unwrap_or_default();
        let magnitude = v.abs();
        let sign = if v < 0.0 { "-" } else { "" };
        if magnitude >= 1_000_000_000.0 {
            format!("{sign}Rp {:.1}M", magnitude / 1_000_000_000.0)
        } else if magnitude >= 1_000_000.0 {
            format!("{sign}Rp {:.1}Jt", magnitude / 1_000_000.0)
        } else if magnitude >= 1_000.0 {
            format!("{sign}Rp {:.0}rb", magnitude / 1_000.0)
        } else {
            format!("{sign}Rp {}", id_grouped(self.value.abs()))
        }
    }
}

/// Formats `value` (non-negative) with id-ID digit grouping.
fn id_grouped(value: Decimal) -> String {
    let formatted = if value.fract().is_zero() {
        format_num::format_num!(",.0f", value.to_f64().unwrap_or_default())
    } else {
        format_num::format_num!(",.2f", value.to_f64().unwrap_or_default())
    };
    // en grouping -> id grouping, e.g. "1,500,000.25" -> "1.500.000,25"
    formatted
        .chars()
        .map(|c| match c {
            ',' => '.',
            '.' => ',',
            c => c,
        })
        .collect()
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(String);

impl AmountError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Error for AmountError {}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::new("An empty string is not an amount"));
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        let (had_symbol, body) = match unsigned.strip_prefix("Rp") {
            Some(rest) => (true, rest.trim_start().trim_start_matches('.')),
            None => (false, unsigned),
        };

        // With the Rp prefix the dots are thousands separators and a comma
        // marks the decimals; without it the string is a plain number where
        // commas, if any, are thousands separators.
        let normalized = if had_symbol {
            body.replace('.', "").replace(',', ".")
        } else {
            body.replace(',', "")
        };

        let value = Decimal::from_str(&normalized)
            .map_err(|e| AmountError::new(format!("Invalid amount '{s}': {e}")))?;
        let value = if negative { -value } else { value };
        Ok(Amount::new(value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (sign, magnitude) = if self.is_negative() {
            ("-", self.value().abs())
        } else {
            ("", self.value())
        };
        write!(f, "{sign}Rp {}", id_grouped(magnitude))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // The backend sends and receives plain JSON numbers.
        if self.value.fract().is_zero() {
            if let Some(whole) = self.value.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        serializer.serialize_f64(self.value.to_f64().unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer).map(Amount::new)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount::new(self.value + rhs.value)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.value += rhs.value;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount::new(self.value - rhs.value)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount::new(-self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        let amount = Amount::from_str("50000").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50000").unwrap());
    }

    #[test]
    fn test_parse_with_symbol_and_separators() {
        let amount = Amount::from_str("Rp 1.500.000").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1500000").unwrap());
    }

    #[test]
    fn test_parse_with_decimal_comma() {
        let amount = Amount::from_str("Rp 1.500.000,25").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1500000.25").unwrap());
    }

    #[test]
    fn test_parse_negative() {
        let amount = Amount::from_str("-Rp 50.000").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("-50000").unwrap());
    }

    #[test]
    fn test_parse_plain_with_commas() {
        let amount = Amount::from_str("1,500,000").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1500000").unwrap());
    }

    #[test]
    fn test_parse_whitespace() {
        let amount = Amount::from_str("  Rp 50.000  ").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50000").unwrap());
    }

    #[test]
    fn test_parse_empty_string_is_an_error() {
        assert!(Amount::from_str("").is_err());
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        assert!(Amount::from_str("lima puluh ribu").is_err());
    }

    #[test]
    fn test_display_grouping() {
        let amount = Amount::from_str("1500000").unwrap();
        assert_eq!(amount.to_string(), "Rp 1.500.000");
    }

    #[test]
    fn test_display_zero() {
        assert_eq!(Amount::ZERO.to_string(), "Rp 0");
    }

    #[test]
    fn test_display_negative() {
        let amount = Amount::from_str("-50000").unwrap();
        assert_eq!(amount.to_string(), "-Rp 50.000");
    }

    #[test]
    fn test_display_fractional() {
        let amount = Amount::from_str("1500000.25").unwrap();
        assert_eq!(amount.to_string(), "Rp 1.500.000,25");
    }

    #[test]
    fn test_compact() {
        assert_eq!(Amount::from_str("2100000000").unwrap().compact(), "Rp 2.1M");
        assert_eq!(Amount::from_str("1500000").unwrap().compact(), "Rp 1.5Jt");
        assert_eq!(Amount::from_str("500000").unwrap().compact(), "Rp 500rb");
        assert_eq!(Amount::from_str("750").unwrap().compact(), "Rp 750");
    }

    #[test]
    fn test_masked() {
        let amount = Amount::from_str("500000").unwrap();
        assert_eq!(amount.display_or_masked(false), MASKED);
        assert_eq!(amount.display_or_masked(true), "Rp 500.000");
    }

    #[test]
    fn test_serialize_whole_as_integer() {
        let amount = Amount::from_str("500000").unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "500000");
    }

    #[test]
    fn test_serialize_fraction_as_float() {
        let amount = Amount::from_str("10.5").unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "10.5");
    }

    #[test]
    fn test_deserialize_integer() {
        let amount: Amount = serde_json::from_str("500000").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("500000").unwrap());
    }

    #[test]
    fn test_deserialize_float() {
        let amount: Amount = serde_json::from_str("150.75").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("150.75").unwrap());
    }

    #[test]
    fn test_arithmetic() {
        let a = Amount::from_str("500000").unwrap();
        let b = Amount::from_str("150000").unwrap();
        assert_eq!((a - b).value(), Decimal::from_str("350000").unwrap());
        assert_eq!((b - a).value(), Decimal::from_str("-350000").unwrap());
        assert_eq!((-b).value(), Decimal::from_str("-150000").unwrap());
        let mut sum = Amount::ZERO;
        sum += a;
        sum += b;
        assert_eq!(sum.value(), Decimal::from_str("650000").unwrap());
    }

    #[test]
    fn test_zero_is_not_positive_or_negative() {
        assert!(!Amount::ZERO.is_positive());
        assert!(!Amount::ZERO.is_negative());
        assert!(Amount::ZERO.is_zero());
    }

    #[test]
    fn test_ordering() {
        let a = Amount::from_str("30000").unwrap();
        let b = Amount::from_str("50000").unwrap();
        assert!(a < b);
    }
}
