//! Type-safe price representation using decimal arithmetic.
//!
//! Prices arrive as loosely formatted strings (`"19.9"`, `" 10 "`, `"2e1"`)
//! and are echoed back everywhere - titles, descriptions, messages and the
//! upstream payload - with exactly two decimal places.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of fractional digits every rendered amount carries.
const DISPLAY_SCALE: u32 = 2;

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty or whitespace.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number")]
    NotNumeric,
    /// The input is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
    /// The input is a number too large to carry two decimal places.
    #[error("price is out of range")]
    OutOfRange,
}

/// A strictly positive price.
///
/// ## Examples
///
/// ```
/// use product_relay_core::Price;
///
/// assert_eq!(Price::parse("19.9").unwrap().formatted(), "19.90");
/// assert_eq!(Price::parse(" 10 ").unwrap().formatted(), "10.00");
///
/// assert!(Price::parse("0").is_err());
/// assert!(Price::parse("-5").is_err());
/// assert!(Price::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Parse a `Price` from user input.
    ///
    /// Leading and trailing whitespace is ignored. Plain decimals and
    /// scientific notation are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, is not a decimal number, or is
    /// not greater than zero.
    pub fn parse(raw: &str) -> Result<Self, PriceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        // rust_decimal accepts digit separators, user input never should
        if trimmed.contains('_') {
            return Err(PriceError::NotNumeric);
        }

        let amount = match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed))
        {
            Ok(amount) => amount,
            // Numeric, but outside what a Decimal can hold
            Err(_) => {
                return match trimmed.parse::<f64>() {
                    Ok(value) if value.is_finite() && value <= 0.0 => Err(PriceError::NotPositive),
                    Ok(value) if value.is_finite() => Err(PriceError::OutOfRange),
                    _ => Err(PriceError::NotNumeric),
                };
            }
        };

        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }

        if display_amount(amount).scale() != DISPLAY_SCALE {
            return Err(PriceError::OutOfRange);
        }

        Ok(Self(amount))
    }

    /// Render the price with exactly two decimal places (`19.9` -> `"19.90"`).
    #[must_use]
    pub fn formatted(&self) -> String {
        format_amount(self.0)
    }
}

/// Render any decimal amount with exactly two decimal places.
///
/// Midpoints round away from zero.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    display_amount(amount).to_string()
}

/// Round to two places. `rescale` keeps fewer places when the 96-bit mantissa
/// cannot hold the extra digits, so callers check `scale()` where it matters.
fn display_amount(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    rounded
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.formatted())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
