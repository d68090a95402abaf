use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::ValidationError;

/// Largest amount a numeric(10,2) column can hold, in cents.
const MAX_PRICE_CENTS: i64 = 9_999_999_999;

/// Currency amount with two fractional digits.
///
/// Persisted as fixed-point text (`"1250.50"`) and exchanged with callers as a
/// JSON number (`1250.5`). Every constructor rounds to the cent, so the stored
/// and returned values never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    pub const SCALE: u32 = 2;

    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Builds a price from whole cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, Self::SCALE))
    }

    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Fixed-point text with exactly two fractional digits.
    #[must_use]
    pub fn to_storage(self) -> String {
        let mut scaled = self.0;
        scaled.rescale(Self::SCALE);
        scaled.to_string()
    }

    #[must_use]
    pub fn to_f64(self) -> Option<f64> {
        self.0.to_f64()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_storage())
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self::new)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self
            .to_f64()
            .ok_or_else(|| serde::ser::Error::custom(format!("price {self} is not representable")))?;
        serializer.serialize_f64(value)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Decimal::from_f64(value)
            .map(Self::new)
            .ok_or_else(|| serde::de::Error::custom(format!("price {value} is not a finite number")))
    }
}

impl ToSql for Price {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_storage()))
    }
}

impl FromSql for Price {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Price::from_str(text).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// Field rule: positive, and small enough for numeric(10,2).
pub fn validate_price(price: &Price) -> Result<(), ValidationError> {
    if price.amount() <= Decimal::ZERO {
        let mut err = ValidationError::new("price_not_positive");
        err.message = Some("Price must be positive".into());
        return Err(err);
    }
    if price.amount() > Decimal::new(MAX_PRICE_CENTS, Price::SCALE) {
        let mut err = ValidationError::new("price_out_of_range");
        err.message = Some("Price cannot exceed 99999999.99".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keeps_two_places() {
        let price: Price = serde_json::from_str("1250.5").unwrap();
        assert_eq!(price.to_storage(), "1250.50");
        assert_eq!(Price::from_str("1250.50").unwrap(), price);
    }

    #[test]
    fn test_serializes_as_number() {
        let price = Price::from_str("75.00").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "75.0");

        let value = serde_json::to_value(Price::from_cents(125_050)).unwrap();
        assert_eq!(value.as_f64(), Some(1250.5));
    }

    #[test]
    fn test_rounds_to_cent() {
        let price: Price = serde_json::from_str("19.999").unwrap();
        assert_eq!(price.to_storage(), "20.00");

        let price: Price = serde_json::from_str("0.125").unwrap();
        assert_eq!(price.to_storage(), "0.13");
    }

    #[test]
    fn test_accepts_integers() {
        let price: Price = serde_json::from_str("80").unwrap();
        assert_eq!(price, Price::from_cents(8000));
    }

    #[test]
    fn test_rejects_strings() {
        assert!(serde_json::from_str::<Price>("\"12.00\"").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(&Price::from_cents(1)).is_ok());
        assert!(validate_price(&Price::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert!(validate_price(&Price::from_cents(0)).is_err());
        assert!(validate_price(&Price::from_cents(-500)).is_err());
        assert!(validate_price(&Price::from_cents(10_000_000_000)).is_err());
    }
}
