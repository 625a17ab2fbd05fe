//! Menu price using decimal arithmetic.
//!
//! Prices are always in Turkish lira and never negative. On the wire a price
//! is a plain JSON number (`149.99`), which is what the menu pages and the
//! admin forms exchange; the admin form may also send it as a numeric string.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The input is not a number.
    #[error("price is not a valid number: {0}")]
    NotANumber(String),
    /// The amount does not fit the price column.
    #[error("price cannot exceed {}", Price::MAX)]
    TooLarge,
}

/// A non-negative menu price in Turkish lira.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Currency symbol appended when displaying prices.
    pub const SYMBOL: &'static str = "₺";

    /// Number of decimal places prices are rounded to.
    const SCALE: u32 = 2;

    /// Largest storable amount (`NUMERIC(10, 2)`).
    pub const MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

    /// Create a price, rounding to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if the amount is below zero and
    /// `PriceError::TooLarge` if it rounds above [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        let amount = amount.round_dp(Self::SCALE);
        if amount > Self::MAX {
            return Err(PriceError::TooLarge);
        }
        Ok(Self(amount))
    }

    /// Parse a price from a user-supplied string such as `"149.99"` or `"149,99"`.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotANumber` for non-numeric input and
    /// `PriceError::Negative` for amounts below zero.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let normalized = s.trim().replace(',', ".");
        let amount = Decimal::from_str(&normalized)
            .map_err(|_| PriceError::NotANumber(s.trim().to_owned()))?;
        Self::new(amount)
    }

    /// Build a price from a JSON float.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotANumber` for NaN/infinite input and
    /// `PriceError::Negative` for amounts below zero.
    pub fn from_f64(value: f64) -> Result<Self, PriceError> {
        let amount =
            Decimal::try_from(value).map_err(|_| PriceError::NotANumber(value.to_string()))?;
        Self::new(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display on the menu (e.g. `149.99 ₺`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.0.normalize(), Self::SYMBOL)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(&self.0.to_string()),
        }
    }
}

/// Wire forms accepted for a price.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match PriceRepr::deserialize(deserializer)? {
            PriceRepr::Number(value) => Self::from_f64(value),
            PriceRepr::Text(text) => Self::parse(&text),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_rejected() {
        assert_eq!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative)
        );
    }

    #[test]
    fn test_upper_bound_matches_column() {
        assert_eq!(Price::MAX, Decimal::new(9_999_999_999, 2));
        assert!(Price::parse("99999999.99").is_ok());
        assert_eq!(Price::parse("100000000"), Err(PriceError::TooLarge));
        assert_eq!(Price::from_f64(1_000_000_000.0), Err(PriceError::TooLarge));
        // Rounds up past the limit
        assert_eq!(Price::parse("99999999.999"), Err(PriceError::TooLarge));
    }

    #[test]
    fn test_zero_allowed() {
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_parse_accepts_comma_decimal() {
        let price = Price::parse("149,99").unwrap();
        assert_eq!(price.amount(), Decimal::new(14999, 2));
    }

    #[test]
    fn test_parse_rejects_text() {
        assert!(matches!(
            Price::parse("bedava"),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_display_appends_lira() {
        let price = Price::parse("220").unwrap();
        assert_eq!(price.display(), "220 ₺");
        let price = Price::parse("45.99").unwrap();
        assert_eq!(price.to_string(), "45.99 ₺");
    }

    #[test]
    fn test_json_number_and_string_forms() {
        let from_number: Price = serde_json::from_str("169.99").unwrap();
        let from_text: Price = serde_json::from_str("\"169.99\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "169.99");
    }

    #[test]
    fn test_json_negative_rejected() {
        assert!(serde_json::from_str::<Price>("-5").is_err());
    }
}
