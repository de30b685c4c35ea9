use crate::domain::errors::DomainResult;
use crate::domain::leftover::{LeftOver, LeftOverId, LeftOverUpdate, NewLeftOver};
use crate::domain::product::{Product, ProductId, Stock};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Before and after images of a record changed by the ledger.
#[derive(Debug, Clone)]
pub struct Change<T> {
    pub previous: T,
    pub current: T,
}

#[derive(Debug, Clone)]
pub struct Restock {
    pub product_id: ProductId,
    pub stock: Stock,
    pub updated_at: DateTime<Utc>,
}

/// Atomic stock movements between products and leftover records.
///
/// Each method is one transaction: either every stock adjustment and the
/// leftover write become visible together, or nothing does. Implementations
/// must serialize concurrent calls touching the same product.
#[async_trait]
pub trait InventoryLedger: Send + Sync {
    /// Create a leftover and debit its quantity from the product.
    async fn reserve(&self, reservation: NewLeftOver) -> DomainResult<LeftOver>;
    /// Edit a leftover, moving stock between products as needed.
    async fn reconcile(&self, update: LeftOverUpdate) -> DomainResult<Change<LeftOver>>;
    /// Delete a leftover and credit its quantity back to the product,
    /// stamping the product's `updated_at` with `at`.
    async fn release(&self, id: LeftOverId, at: DateTime<Utc>) -> DomainResult<LeftOver>;
    /// Set a product's nominal stock.
    async fn restock(&self, restock: Restock) -> DomainResult<Change<Product>>;
}
