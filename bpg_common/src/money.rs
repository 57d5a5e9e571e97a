use std::{fmt::Display, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Type;
use thiserror::Error;

const CENTS_PER_UNIT: i64 = 100;
const MICROS_PER_UNIT: i64 = 1_000_000;
const MICROS_PER_CENT: i64 = MICROS_PER_UNIT / CENTS_PER_UNIT;
const MAX_PRICE_DECIMALS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("'{0}' is not a valid decimal amount")]
    InvalidFormat(String),
    #[error("Prices cannot be negative: {0}")]
    Negative(String),
    #[error("Prices are limited to six decimal places: {0}")]
    TooPrecise(String),
    #[error("The amount is too large to be represented")]
    Overflow,
}

//--------------------------------------        Money        ---------------------------------------------------------
/// A currency amount, stored as a whole number of cents.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Ord, PartialOrd, Hash)]
#[sqlx(transparent)]
pub struct Money(i64);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// The amount in major units. Only use this at the wire boundary; all arithmetic stays in cents.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    /// Converts a floating point amount in major units to the nearest cent, rounding half away from zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64(value: f64) -> Result<Self, MoneyError> {
        let cents = (value * CENTS_PER_UNIT as f64).round();
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return Err(MoneyError::Overflow);
        }
        Ok(Self(cents as i64))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / CENTS_PER_UNIT as u64;
        let cents = abs % CENTS_PER_UNIT as u64;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

// Payment gateways expect plain decimal numbers, so `Money` goes over the wire as a float in major units.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_f64(value).map_err(de::Error::custom)
    }
}

//--------------------------------------      UnitPrice      ---------------------------------------------------------
/// The price of a single unit, stored in millionths of the currency unit so that prices with sub-cent precision are
/// represented exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct UnitPrice(i64);

impl UnitPrice {
    pub fn from_micros(micros: i64) -> Result<Self, MoneyError> {
        if micros < 0 {
            return Err(MoneyError::Negative(micros.to_string()));
        }
        Ok(Self(micros))
    }

    pub fn micros(&self) -> i64 {
        self.0
    }

    /// Calculates `round(quantity × price, 2)`.
    ///
    /// Rounding is half away from zero, so 0.125 becomes 0.13 and -0.125 becomes -0.13. The calculation is exact:
    /// the intermediate product is kept in 128-bit integers and no floating point is involved.
    pub fn total_for(&self, quantity: i64) -> Result<Money, MoneyError> {
        let micros = i128::from(self.0) * i128::from(quantity);
        let divisor = i128::from(MICROS_PER_CENT);
        let mut cents = micros / divisor;
        let remainder = micros % divisor;
        if remainder.abs() * 2 >= divisor {
            cents += micros.signum();
        }
        let cents = i64::try_from(cents).map_err(|_| MoneyError::Overflow)?;
        Ok(Money::from_cents(cents))
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / MICROS_PER_UNIT as f64
    }
}

impl FromStr for UnitPrice {
    type Err = MoneyError;

    /// Parses a plain decimal such as `2`, `2.5` or `0.125`. Signs, exponents and thousands separators are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(MoneyError::Negative(s.to_string()));
        }
        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        let is_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
            return Err(MoneyError::InvalidFormat(s.to_string()));
        }
        if frac.len() > MAX_PRICE_DECIMALS {
            return Err(MoneyError::TooPrecise(s.to_string()));
        }
        let whole = if whole.is_empty() { 0 } else { whole.parse::<i64>().map_err(|_| MoneyError::Overflow)? };
        let frac = format!("{frac:0<width$}", width = MAX_PRICE_DECIMALS)
            .parse::<i64>()
            .map_err(|_| MoneyError::Overflow)?;
        let micros = whole.checked_mul(MICROS_PER_UNIT).and_then(|w| w.checked_add(frac)).ok_or(MoneyError::Overflow)?;
        Ok(Self(micros))
    }
}

impl Display for UnitPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let units = self.0 / MICROS_PER_UNIT;
        let frac = format!("{:06}", self.0 % MICROS_PER_UNIT);
        let frac = frac.trim_end_matches('0');
        write!(f, "{units}.{frac:0<2}")
    }
}

impl Serialize for UnitPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}
