// src/domain/leftover/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeftOverId(pub i64);

impl LeftOverId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("leftover id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<LeftOverId> for i64 {
    fn from(value: LeftOverId) -> Self {
        value.0
    }
}

impl fmt::Display for LeftOverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Units held by a custodian. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(i32);

impl Quantity {
    pub fn new(value: i32) -> DomainResult<Self> {
        if value <= 0 {
            return Err(DomainError::Validation(
                "quantity must be greater than 0".into(),
            ));
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<Quantity> for i32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Custodian {
    name: String,
    location: String,
}

impl Custodian {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        let location = location.into().trim().to_string();
        if name.is_empty() || location.is_empty() {
            return Err(DomainError::Validation("all fields are required".into()));
        }
        Ok(Self { name, location })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_must_be_positive() {
        assert!(Quantity::new(0).is_err());
        assert!(Quantity::new(-3).is_err());
        assert_eq!(Quantity::new(4).unwrap().get(), 4);
    }

    #[test]
    fn custodian_requires_both_fields() {
        assert!(Custodian::new("Ayesha", " ").is_err());
        assert!(Custodian::new("", "Lahore").is_err());
        let custodian = Custodian::new(" Ayesha ", "Lahore").unwrap();
        assert_eq!(custodian.name(), "Ayesha");
        assert_eq!(custodian.location(), "Lahore");
    }
}
