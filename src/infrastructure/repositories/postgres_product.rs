// src/infrastructure/repositories/postgres_product.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::product::{
    NewProduct, Price, Product, ProductDetails, ProductId, ProductName, ProductRepository,
    ProductUpdate, Stock,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

pub(super) const PRODUCT_COLUMNS: &str = "id, name, product_number, description, price, stock, \
     category, location, product_type, images, color_variants, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ProductRow {
    pub(super) id: i64,
    pub(super) name: String,
    pub(super) product_number: Option<String>,
    pub(super) description: Option<String>,
    pub(super) price: Decimal,
    pub(super) stock: i32,
    pub(super) category: Option<String>,
    pub(super) location: Option<String>,
    pub(super) product_type: Option<String>,
    pub(super) images: Vec<String>,
    pub(super) color_variants: serde_json::Value,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DomainError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(row.id)?,
            name: ProductName::new(row.name)?,
            product_number: row.product_number,
            description: row.description,
            price: Price::new(row.price)?,
            stock: Stock::new(row.stock)?,
            category: row.category,
            location: row.location,
            product_type: row.product_type,
            images: row.images,
            color_variants: row.color_variants,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        let NewProduct {
            details,
            stock,
            created_at,
        } = product;
        let ProductDetails {
            name,
            product_number,
            description,
            price,
            category,
            location,
            product_type,
            images,
            color_variants,
        } = details;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, product_number, description, price, stock, category, \
             location, product_type, images, color_variants, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(name.as_str())
        .bind(product_number)
        .bind(description)
        .bind(price.get())
        .bind(stock.get())
        .bind(category)
        .bind(location)
        .bind(product_type)
        .bind(images)
        .bind(color_variants)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Product::try_from(row)
    }

    async fn update(&self, update: ProductUpdate) -> DomainResult<Product> {
        let ProductUpdate {
            id,
            details,
            updated_at,
        } = update;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products SET name = $2, product_number = $3, description = $4, price = $5,
                 category = $6, location = $7, product_type = $8, images = $9,
                 color_variants = $10, updated_at = $11
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(details.name.as_str())
        .bind(details.product_number)
        .bind(details.description)
        .bind(details.price.get())
        .bind(details.category)
        .bind(details.location)
        .bind(details.product_type)
        .bind(details.images)
        .bind(details.color_variants)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map_or_else(
            || Err(DomainError::NotFound("product not found".into())),
            Product::try_from,
        )
    }

    async fn delete(&self, id: ProductId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("product not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Product::try_from).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Product::try_from).collect()
    }
}
