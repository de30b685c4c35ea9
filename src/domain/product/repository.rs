use crate::domain::errors::DomainResult;
use crate::domain::product::entity::{NewProduct, Product, ProductUpdate};
use crate::domain::product::value_objects::ProductId;
use async_trait::async_trait;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: NewProduct) -> DomainResult<Product>;
    async fn update(&self, update: ProductUpdate) -> DomainResult<Product>;
    async fn delete(&self, id: ProductId) -> DomainResult<()>;
    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>>;
    /// All products ordered by name.
    async fn list(&self) -> DomainResult<Vec<Product>>;
}
