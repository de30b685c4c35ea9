// src/application/commands/categories.rs
use crate::{
    application::{
        dto::{AuditContext, CategoryDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
        services::{AuditRecorder, AuditTarget},
    },
    domain::{
        audit::{AuditAction, EntityType},
        category::{
            CategoryDescription, CategoryId, CategoryName, CategoryRepository, CategoryUpdate,
            NewCategory,
        },
        errors::DomainError,
    },
};
use std::sync::Arc;

pub struct CreateCategoryCommand {
    pub name: String,
    pub description: String,
}

pub struct UpdateCategoryCommand {
    pub id: i64,
    pub name: String,
    pub description: String,
}

pub struct DeleteCategoryCommand {
    pub id: i64,
}

pub struct CategoryCommandService {
    repo: Arc<dyn CategoryRepository>,
    audit: AuditRecorder,
    clock: Arc<dyn Clock>,
}

impl CategoryCommandService {
    pub fn new(
        repo: Arc<dyn CategoryRepository>,
        audit: AuditRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { repo, audit, clock }
    }

    pub async fn create_category(
        &self,
        ctx: &AuditContext,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let name = CategoryName::new(command.name)?;
        let description = CategoryDescription::new(command.description)?;

        let created = self
            .repo
            .insert(NewCategory {
                name,
                description,
                created_at: self.clock.now(),
            })
            .await
            .map_err(duplicate_name)?;

        let dto = CategoryDto::from(created);
        self.audit.record(
            ctx,
            AuditAction::Create,
            AuditTarget::new(EntityType::Category, dto.id, dto.name.clone()),
            None,
            Some(&dto),
        );
        Ok(dto)
    }

    pub async fn update_category(
        &self,
        ctx: &AuditContext,
        command: UpdateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(command.id)?;
        let name = CategoryName::new(command.name)?;
        let description = CategoryDescription::new(command.description)?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        let updated = self
            .repo
            .update(CategoryUpdate {
                id,
                name,
                description,
                updated_at: self.clock.now(),
            })
            .await
            .map_err(duplicate_name)?;

        let old = CategoryDto::from(existing);
        let new = CategoryDto::from(updated);
        self.audit.record(
            ctx,
            AuditAction::Update,
            AuditTarget::new(EntityType::Category, new.id, new.name.clone()),
            Some(&old),
            Some(&new),
        );
        Ok(new)
    }

    pub async fn delete_category(
        &self,
        ctx: &AuditContext,
        command: DeleteCategoryCommand,
    ) -> ApplicationResult<()> {
        let id = CategoryId::new(command.id)?;
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        self.repo.delete(id).await?;

        let old = CategoryDto::from(existing);
        self.audit.record(
            ctx,
            AuditAction::Delete,
            AuditTarget::new(EntityType::Category, old.id, old.name.clone()),
            Some(&old),
            None,
        );
        Ok(())
    }
}

fn duplicate_name(err: DomainError) -> ApplicationError {
    match err {
        DomainError::Conflict(_) => ApplicationError::conflict("category name already exists"),
        other => other.into(),
    }
}
