// src/application/queries/leftovers.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::LeftOverDetailDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::leftover::{LeftOverId, LeftOverReadRepository},
};

pub struct LeftOverQueryService {
    repo: Arc<dyn LeftOverReadRepository>,
}

impl LeftOverQueryService {
    pub fn new(repo: Arc<dyn LeftOverReadRepository>) -> Self {
        Self { repo }
    }

    /// Newest first, each record joined with its product.
    pub async fn list_leftovers(&self) -> ApplicationResult<Vec<LeftOverDetailDto>> {
        let rows = self.repo.list().await?;
        Ok(rows.into_iter().map(LeftOverDetailDto::from).collect())
    }

    pub async fn get_leftover(&self, id: i64) -> ApplicationResult<LeftOverDetailDto> {
        let id = LeftOverId::new(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .map(LeftOverDetailDto::from)
            .ok_or_else(|| ApplicationError::not_found("leftover not found"))
    }
}
