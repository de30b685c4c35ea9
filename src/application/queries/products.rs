// src/application/queries/products.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::ProductDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::product::{ProductId, ProductRepository},
};

pub struct ProductQueryService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductQueryService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_products(&self) -> ApplicationResult<Vec<ProductDto>> {
        let products = self.repo.list().await?;
        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    pub async fn get_product(&self, id: i64) -> ApplicationResult<ProductDto> {
        let id = ProductId::new(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .map(ProductDto::from)
            .ok_or_else(|| ApplicationError::not_found("product not found"))
    }
}
