use crate::domain::product::Product;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

/// Wire and audit-snapshot shape of a product.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub product_number: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub images: Vec<String>,
    #[schema(value_type = Object)]
    pub color_variants: serde_json::Value,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into(),
            name: product.name.into(),
            product_number: product.product_number,
            description: product.description,
            price: product.price.into(),
            stock: product.stock.into(),
            category: product.category,
            location: product.location,
            product_type: product.product_type,
            images: product.images,
            color_variants: product.color_variants,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
