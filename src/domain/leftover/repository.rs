use crate::domain::errors::DomainResult;
use crate::domain::leftover::entity::LeftOverWithProduct;
use crate::domain::leftover::value_objects::LeftOverId;
use async_trait::async_trait;

/// Read side for leftovers. Writes go through [`crate::domain::inventory::InventoryLedger`].
#[async_trait]
pub trait LeftOverReadRepository: Send + Sync {
    async fn find_by_id(&self, id: LeftOverId) -> DomainResult<Option<LeftOverWithProduct>>;
    /// Newest first.
    async fn list(&self) -> DomainResult<Vec<LeftOverWithProduct>>;
}
