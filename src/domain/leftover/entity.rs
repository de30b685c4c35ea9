// src/domain/leftover/entity.rs
use crate::domain::leftover::value_objects::{Custodian, LeftOverId, Quantity};
use crate::domain::product::{Product, ProductId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct LeftOver {
    pub id: LeftOverId,
    pub product_id: ProductId,
    pub custodian: Custodian,
    pub quantity: Quantity,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A leftover joined with the product it references.
#[derive(Debug, Clone)]
pub struct LeftOverWithProduct {
    pub leftover: LeftOver,
    pub product: Product,
}

#[derive(Debug, Clone)]
pub struct NewLeftOver {
    pub product_id: ProductId,
    pub custodian: Custodian,
    pub quantity: Quantity,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LeftOverUpdate {
    pub id: LeftOverId,
    pub product_id: ProductId,
    pub custodian: Custodian,
    pub quantity: Quantity,
    pub updated_at: DateTime<Utc>,
}
