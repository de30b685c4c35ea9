// src/infrastructure/repositories/postgres_ledger.rs
use super::map_sqlx;
use super::postgres_leftover::{LEFTOVER_COLUMNS, LeftOverRow};
use super::postgres_product::{PRODUCT_COLUMNS, ProductRow};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::inventory::{
    Change, InventoryLedger, Restock, StockPlan,
    plan::{plan_reconcile, plan_release, plan_reserve, plan_restock},
};
use crate::domain::leftover::{LeftOver, LeftOverId, LeftOverUpdate, NewLeftOver};
use crate::domain::product::{Product, ProductId, Stock};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::BTreeMap;
use tracing::debug;

/// Ledger backed by PostgreSQL row locks.
///
/// Every operation runs in one transaction and locks the product rows it
/// touches with `SELECT ... FOR UPDATE` in ascending id order, so two
/// operations on overlapping products always queue instead of deadlocking.
#[derive(Clone)]
pub struct PostgresInventoryLedger {
    pool: PgPool,
}

impl PostgresInventoryLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type Tx = Transaction<'static, Postgres>;

async fn lock_stock(
    tx: &mut Tx,
    ids: &[ProductId],
) -> DomainResult<BTreeMap<ProductId, Stock>> {
    let mut raw: Vec<i64> = ids.iter().map(|id| i64::from(*id)).collect();
    raw.sort_unstable();
    raw.dedup();

    let rows: Vec<(i64, i32)> = sqlx::query_as(
        "SELECT id, stock FROM products WHERE id = ANY($1) ORDER BY id FOR UPDATE",
    )
    .bind(raw)
    .fetch_all(&mut **tx)
    .await
    .map_err(map_sqlx)?;

    rows.into_iter()
        .map(|(id, stock)| Ok((ProductId::new(id)?, Stock::new(stock)?)))
        .collect()
}

async fn lock_leftover(tx: &mut Tx, id: LeftOverId) -> DomainResult<LeftOver> {
    let row = sqlx::query_as::<_, LeftOverRow>(&format!(
        "SELECT {LEFTOVER_COLUMNS} FROM leftovers WHERE id = $1 FOR UPDATE"
    ))
    .bind(i64::from(id))
    .fetch_optional(&mut **tx)
    .await
    .map_err(map_sqlx)?;

    row.map_or_else(
        || Err(DomainError::NotFound("leftover not found".into())),
        LeftOver::try_from,
    )
}

fn locked(stocks: &BTreeMap<ProductId, Stock>, id: ProductId) -> DomainResult<Stock> {
    stocks
        .get(&id)
        .copied()
        .ok_or_else(|| DomainError::NotFound("product not found".into()))
}

async fn apply_plan(
    tx: &mut Tx,
    plan: &StockPlan,
    stocks: &BTreeMap<ProductId, Stock>,
    at: DateTime<Utc>,
) -> DomainResult<()> {
    for adjustment in plan.adjustments() {
        let current = locked(stocks, adjustment.product_id)?;
        let next = adjustment.apply(current)?;
        sqlx::query("UPDATE products SET stock = $2, updated_at = $3 WHERE id = $1")
            .bind(i64::from(adjustment.product_id))
            .bind(next.get())
            .bind(at)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx)?;
        debug!(
            product_id = %adjustment.product_id,
            delta = adjustment.delta,
            stock = next.get(),
            "stock adjusted"
        );
    }
    Ok(())
}

#[async_trait]
impl InventoryLedger for PostgresInventoryLedger {
    async fn reserve(&self, reservation: NewLeftOver) -> DomainResult<LeftOver> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let stocks = lock_stock(&mut tx, &[reservation.product_id]).await?;
        let stock = locked(&stocks, reservation.product_id)?;
        let plan = plan_reserve(reservation.product_id, stock, reservation.quantity)?;
        apply_plan(&mut tx, &plan, &stocks, reservation.created_at).await?;

        let row = sqlx::query_as::<_, LeftOverRow>(&format!(
            "INSERT INTO leftovers (product_id, custodian_name, custodian_location, quantity, \
             created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {LEFTOVER_COLUMNS}"
        ))
        .bind(i64::from(reservation.product_id))
        .bind(reservation.custodian.name())
        .bind(reservation.custodian.location())
        .bind(reservation.quantity.get())
        .bind(reservation.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        LeftOver::try_from(row)
    }

    async fn reconcile(&self, update: LeftOverUpdate) -> DomainResult<Change<LeftOver>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let previous = lock_leftover(&mut tx, update.id).await?;
        let stocks = lock_stock(&mut tx, &[previous.product_id, update.product_id]).await?;
        let target_stock = locked(&stocks, update.product_id)?;
        let plan = plan_reconcile(&previous, update.product_id, target_stock, update.quantity)?;
        apply_plan(&mut tx, &plan, &stocks, update.updated_at).await?;

        let row = sqlx::query_as::<_, LeftOverRow>(&format!(
            "UPDATE leftovers SET product_id = $2, custodian_name = $3, custodian_location = $4,
                 quantity = $5, updated_at = $6
             WHERE id = $1
             RETURNING {LEFTOVER_COLUMNS}"
        ))
        .bind(i64::from(update.id))
        .bind(i64::from(update.product_id))
        .bind(update.custodian.name())
        .bind(update.custodian.location())
        .bind(update.quantity.get())
        .bind(update.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(Change {
            previous,
            current: LeftOver::try_from(row)?,
        })
    }

    async fn release(&self, id: LeftOverId, at: DateTime<Utc>) -> DomainResult<LeftOver> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let existing = lock_leftover(&mut tx, id).await?;
        let stocks = lock_stock(&mut tx, &[existing.product_id]).await?;
        let plan = plan_release(&existing);
        apply_plan(&mut tx, &plan, &stocks, at).await?;

        sqlx::query("DELETE FROM leftovers WHERE id = $1")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(existing)
    }

    async fn restock(&self, restock: Restock) -> DomainResult<Change<Product>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(i64::from(restock.product_id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        let previous = row.map_or_else(
            || Err(DomainError::NotFound("product not found".into())),
            Product::try_from,
        )?;

        let plan = plan_restock(previous.id, previous.stock, restock.stock);
        let stocks = BTreeMap::from([(previous.id, previous.stock)]);
        apply_plan(&mut tx, &plan, &stocks, restock.updated_at).await?;

        let current = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(i64::from(restock.product_id))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(Change {
            previous,
            current: Product::try_from(current)?,
        })
    }
}
