// src/infrastructure/repositories/postgres_leftover.rs
use super::map_sqlx;
use super::postgres_product::ProductRow;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::leftover::{
    Custodian, LeftOver, LeftOverId, LeftOverReadRepository, LeftOverWithProduct, Quantity,
};
use crate::domain::product::{Product, ProductId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

pub(super) const LEFTOVER_COLUMNS: &str =
    "id, product_id, custodian_name, custodian_location, quantity, created_at, updated_at";

const JOINED_SELECT: &str = "SELECT l.id AS leftover_id, l.product_id AS leftover_product_id,
        l.custodian_name, l.custodian_location, l.quantity,
        l.created_at AS leftover_created_at, l.updated_at AS leftover_updated_at,
        p.id, p.name, p.product_number, p.description, p.price, p.stock, p.category,
        p.location, p.product_type, p.images, p.color_variants, p.created_at, p.updated_at
     FROM leftovers l
     JOIN products p ON p.id = l.product_id";

#[derive(Clone)]
pub struct PostgresLeftOverRepository {
    pool: PgPool,
}

impl PostgresLeftOverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct LeftOverRow {
    id: i64,
    product_id: i64,
    custodian_name: String,
    custodian_location: String,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LeftOverRow> for LeftOver {
    type Error = DomainError;

    fn try_from(row: LeftOverRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LeftOverId::new(row.id)?,
            product_id: ProductId::new(row.product_id)?,
            custodian: Custodian::new(row.custodian_name, row.custodian_location)?,
            quantity: Quantity::new(row.quantity)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct JoinedRow {
    leftover_id: i64,
    leftover_product_id: i64,
    custodian_name: String,
    custodian_location: String,
    quantity: i32,
    leftover_created_at: DateTime<Utc>,
    leftover_updated_at: DateTime<Utc>,
    #[sqlx(flatten)]
    product: ProductRow,
}

impl TryFrom<JoinedRow> for LeftOverWithProduct {
    type Error = DomainError;

    fn try_from(row: JoinedRow) -> Result<Self, Self::Error> {
        let leftover = LeftOver::try_from(LeftOverRow {
            id: row.leftover_id,
            product_id: row.leftover_product_id,
            custodian_name: row.custodian_name,
            custodian_location: row.custodian_location,
            quantity: row.quantity,
            created_at: row.leftover_created_at,
            updated_at: row.leftover_updated_at,
        })?;
        let product = Product::try_from(row.product)?;
        Ok(Self { leftover, product })
    }
}

#[async_trait]
impl LeftOverReadRepository for PostgresLeftOverRepository {
    async fn find_by_id(&self, id: LeftOverId) -> DomainResult<Option<LeftOverWithProduct>> {
        let row = sqlx::query_as::<_, JoinedRow>(&format!("{JOINED_SELECT} WHERE l.id = $1"))
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(LeftOverWithProduct::try_from).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<LeftOverWithProduct>> {
        let rows = sqlx::query_as::<_, JoinedRow>(&format!(
            "{JOINED_SELECT} ORDER BY l.created_at DESC, l.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(LeftOverWithProduct::try_from).collect()
    }
}
