// src/domain/product/entity.rs
use crate::domain::product::value_objects::{Price, ProductId, ProductName, Stock};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub product_number: Option<String>,
    pub description: Option<String>,
    pub price: Price,
    pub stock: Stock,
    pub category: Option<String>,
    pub location: Option<String>,
    pub product_type: Option<String>,
    pub images: Vec<String>,
    pub color_variants: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Descriptive fields shared by product creation and product edits.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub name: ProductName,
    pub product_number: Option<String>,
    pub description: Option<String>,
    pub price: Price,
    pub category: Option<String>,
    pub location: Option<String>,
    pub product_type: Option<String>,
    pub images: Vec<String>,
    pub color_variants: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub details: ProductDetails,
    pub stock: Stock,
    pub created_at: DateTime<Utc>,
}

/// Full replacement of a product's descriptive fields. Stock is deliberately
/// absent: it only moves through the inventory ledger.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub id: ProductId,
    pub details: ProductDetails,
    pub updated_at: DateTime<Utc>,
}
