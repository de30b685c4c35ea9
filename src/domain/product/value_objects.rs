// src/domain/product/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub i64);

impl ProductId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("product id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("product name cannot be empty".into()));
        }
        Ok(Self(value.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ProductName> for String {
    fn from(value: ProductName) -> Self {
        value.0
    }
}

/// Nominal stock count of a product. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stock(i32);

impl Stock {
    pub fn new(value: i32) -> DomainResult<Self> {
        if value < 0 {
            return Err(DomainError::Validation("stock cannot be negative".into()));
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<Stock> for i32 {
    fn from(value: Stock) -> Self {
        value.0
    }
}

/// Must fit `NUMERIC(12, 2)`: at most ten integer digits and two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    const MAX_SCALE: u32 = 2;

    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() {
            return Err(DomainError::Validation("price cannot be negative".into()));
        }
        if value.normalize().scale() > Self::MAX_SCALE {
            return Err(DomainError::Validation(
                "price cannot have more than 2 decimal places".into(),
            ));
        }
        if value >= Decimal::from(10_000_000_000_i64) {
            return Err(DomainError::Validation(
                "price must be less than 10000000000".into(),
            ));
        }
        let mut value = value;
        if value.scale() > Self::MAX_SCALE {
            value.rescale(Self::MAX_SCALE);
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_rejects_negative_values() {
        assert!(Stock::new(-1).is_err());
        assert_eq!(Stock::new(0).unwrap().get(), 0);
    }

    #[test]
    fn price_rejects_negative_values() {
        assert!(Price::new(Decimal::new(-100, 2)).is_err());
        assert_eq!(Price::new(Decimal::new(1999, 2)).unwrap().get().to_string(), "19.99");
    }

    #[test]
    fn price_rejects_more_than_two_decimals() {
        let err = Price::new(Decimal::new(19_999, 3)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref msg) if msg.contains("2 decimal places")));
        let trailing_zero = Price::new(Decimal::new(19_990, 3)).unwrap();
        assert_eq!(trailing_zero.get().to_string(), "19.99");
    }

    #[test]
    fn price_must_fit_ten_integer_digits() {
        assert!(Price::new(Decimal::new(999_999_999_999, 2)).is_ok());
        assert!(Price::new(Decimal::new(1_000_000_000_000, 2)).is_err());
        assert!(Price::new(Decimal::new(12_345_678_901_250, 2)).is_err());
    }

    #[test]
    fn product_name_is_trimmed() {
        assert_eq!(ProductName::new("  Mug ").unwrap().as_str(), "Mug");
        assert!(ProductName::new("   ").is_err());
    }
}
