use crate::application::dto::ProductDto;
use crate::domain::leftover::{LeftOver, LeftOverWithProduct};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeftOverDto {
    pub id: i64,
    pub product_id: i64,
    pub custodian_name: String,
    pub custodian_location: String,
    pub quantity: i32,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<LeftOver> for LeftOverDto {
    fn from(leftover: LeftOver) -> Self {
        Self {
            id: leftover.id.into(),
            product_id: leftover.product_id.into(),
            custodian_name: leftover.custodian.name().to_string(),
            custodian_location: leftover.custodian.location().to_string(),
            quantity: leftover.quantity.into(),
            created_at: leftover.created_at,
            updated_at: leftover.updated_at,
        }
    }
}

/// Leftover with its product embedded, as shown on the admin list.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeftOverDetailDto {
    #[serde(flatten)]
    pub leftover: LeftOverDto,
    pub product: ProductDto,
}

impl From<LeftOverWithProduct> for LeftOverDetailDto {
    fn from(value: LeftOverWithProduct) -> Self {
        Self {
            leftover: value.leftover.into(),
            product: value.product.into(),
        }
    }
}
