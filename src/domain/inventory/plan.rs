//! Stock arithmetic for the inventory ledger.
//!
//! Every ledger operation is first turned into a [`StockPlan`]: a list of
//! signed adjustments to product stock, computed from the rows locked by the
//! caller. Planning never touches storage, so a rejected plan leaves nothing
//! to undo. Backends apply an accepted plan and the leftover write inside the
//! same transaction.
//!
//! Conservation: for every product, `stock + Σ leftover quantities` is the
//! same before and after applying a plan produced here.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::leftover::{LeftOver, Quantity};
use crate::domain::product::{ProductId, Stock};

/// Signed change to one product's nominal stock. Negative debits, positive credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAdjustment {
    pub product_id: ProductId,
    pub delta: i32,
}

impl StockAdjustment {
    /// Apply to the product's current stock. A result below zero means the
    /// plan was computed against stale stock and is reported as insufficient.
    pub fn apply(&self, stock: Stock) -> DomainResult<Stock> {
        let next = stock
            .get()
            .checked_add(self.delta)
            .ok_or_else(|| DomainError::Validation("stock overflow".into()))?;
        if next < 0 {
            return Err(DomainError::InsufficientStock {
                available: stock.get(),
            });
        }
        Stock::new(next)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockPlan {
    adjustments: Vec<StockAdjustment>,
}

impl StockPlan {
    fn push(&mut self, product_id: ProductId, delta: i32) {
        if delta != 0 {
            self.adjustments.push(StockAdjustment { product_id, delta });
        }
    }

    pub fn adjustments(&self) -> &[StockAdjustment] {
        &self.adjustments
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }

    /// Net delta for one product, zero when the plan does not touch it.
    pub fn delta_for(&self, product_id: ProductId) -> i32 {
        self.adjustments
            .iter()
            .filter(|adj| adj.product_id == product_id)
            .map(|adj| adj.delta)
            .sum()
    }
}

/// Largest quantity `target` can hold for a leftover.
///
/// When the leftover already draws from `target`, its current quantity counts
/// towards the headroom because it would be handed back first.
pub fn headroom(existing: Option<&LeftOver>, target: ProductId, target_stock: Stock) -> i32 {
    match existing {
        Some(leftover) if leftover.product_id == target => {
            target_stock.get().saturating_add(leftover.quantity.get())
        }
        _ => target_stock.get(),
    }
}

/// Leftover creation: debit `quantity` from the product.
pub fn plan_reserve(
    product_id: ProductId,
    stock: Stock,
    quantity: Quantity,
) -> DomainResult<StockPlan> {
    let available = headroom(None, product_id, stock);
    if quantity.get() > available {
        return Err(DomainError::InsufficientStock { available });
    }

    let mut plan = StockPlan::default();
    plan.push(product_id, -quantity.get());
    Ok(plan)
}

/// Leftover edit, possibly moving it to another product.
///
/// `target_stock` is the current stock of `target`.
pub fn plan_reconcile(
    existing: &LeftOver,
    target: ProductId,
    target_stock: Stock,
    quantity: Quantity,
) -> DomainResult<StockPlan> {
    let available = headroom(Some(existing), target, target_stock);
    if quantity.get() > available {
        return Err(DomainError::InsufficientStock { available });
    }

    let mut plan = StockPlan::default();
    if existing.product_id == target {
        plan.push(target, existing.quantity.get() - quantity.get());
    } else {
        plan.push(existing.product_id, existing.quantity.get());
        plan.push(target, -quantity.get());
    }
    Ok(plan)
}

/// Leftover deletion: the held quantity always goes back to the product.
pub fn plan_release(existing: &LeftOver) -> StockPlan {
    let mut plan = StockPlan::default();
    plan.push(existing.product_id, existing.quantity.get());
    plan
}

/// Administrative stock correction to an absolute value.
pub fn plan_restock(product_id: ProductId, current: Stock, target: Stock) -> StockPlan {
    let mut plan = StockPlan::default();
    plan.push(product_id, target.get() - current.get());
    plan
}
