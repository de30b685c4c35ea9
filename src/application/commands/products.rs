// src/application/commands/products.rs
use crate::{
    application::{
        dto::{AuditContext, ProductDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
        services::{AuditRecorder, AuditTarget},
    },
    domain::{
        audit::{AuditAction, EntityType},
        inventory::{InventoryLedger, Restock},
        product::{
            NewProduct, Price, ProductDetails, ProductId, ProductName, ProductRepository,
            ProductUpdate, Stock,
        },
    },
};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;

/// Descriptive product fields as submitted by the admin form.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub name: String,
    pub product_number: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub location: Option<String>,
    pub product_type: Option<String>,
    pub images: Vec<String>,
    pub color_variants: Option<Value>,
}

impl ProductInput {
    fn into_details(self) -> ApplicationResult<ProductDetails> {
        let color_variants = match self.color_variants {
            None | Some(Value::Null) => Value::Array(Vec::new()),
            Some(value @ Value::Array(_)) => value,
            Some(_) => {
                return Err(ApplicationError::validation(
                    "colorVariants must be an array",
                ));
            }
        };

        Ok(ProductDetails {
            name: ProductName::new(self.name)?,
            product_number: non_blank(self.product_number),
            description: self.description,
            price: Price::new(self.price)?,
            category: non_blank(self.category),
            location: non_blank(self.location),
            product_type: non_blank(self.product_type),
            images: self.images,
            color_variants,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct CreateProductCommand {
    pub input: ProductInput,
    pub stock: i32,
}

pub struct UpdateProductCommand {
    pub id: i64,
    pub input: ProductInput,
}

pub struct RestockProductCommand {
    pub id: i64,
    pub stock: i32,
}

pub struct DeleteProductCommand {
    pub id: i64,
}

pub struct ProductCommandService {
    repo: Arc<dyn ProductRepository>,
    ledger: Arc<dyn InventoryLedger>,
    audit: AuditRecorder,
    clock: Arc<dyn Clock>,
}

impl ProductCommandService {
    pub fn new(
        repo: Arc<dyn ProductRepository>,
        ledger: Arc<dyn InventoryLedger>,
        audit: AuditRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            ledger,
            audit,
            clock,
        }
    }

    pub async fn create_product(
        &self,
        ctx: &AuditContext,
        command: CreateProductCommand,
    ) -> ApplicationResult<ProductDto> {
        let details = command.input.into_details()?;
        let stock = Stock::new(command.stock)?;

        let created = self
            .repo
            .insert(NewProduct {
                details,
                stock,
                created_at: self.clock.now(),
            })
            .await?;

        let dto = ProductDto::from(created);
        self.audit.record(
            ctx,
            AuditAction::Create,
            AuditTarget::new(EntityType::Product, dto.id, dto.name.clone()),
            None,
            Some(&dto),
        );
        Ok(dto)
    }

    pub async fn update_product(
        &self,
        ctx: &AuditContext,
        command: UpdateProductCommand,
    ) -> ApplicationResult<ProductDto> {
        let id = ProductId::new(command.id)?;
        let details = command.input.into_details()?;
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("product not found"))?;

        let updated = self
            .repo
            .update(ProductUpdate {
                id,
                details,
                updated_at: self.clock.now(),
            })
            .await?;

        let old = ProductDto::from(existing);
        let new = ProductDto::from(updated);
        self.audit.record(
            ctx,
            AuditAction::Update,
            AuditTarget::new(EntityType::Product, new.id, new.name.clone()),
            Some(&old),
            Some(&new),
        );
        Ok(new)
    }

    /// Set nominal stock through the ledger so it serializes with reservations.
    pub async fn restock_product(
        &self,
        ctx: &AuditContext,
        command: RestockProductCommand,
    ) -> ApplicationResult<ProductDto> {
        let id = ProductId::new(command.id)?;
        let stock = Stock::new(command.stock)?;

        let change = self
            .ledger
            .restock(Restock {
                product_id: id,
                stock,
                updated_at: self.clock.now(),
            })
            .await?;

        let old = ProductDto::from(change.previous);
        let new = ProductDto::from(change.current);
        self.audit.record(
            ctx,
            AuditAction::Update,
            AuditTarget::new(EntityType::Product, new.id, new.name.clone()),
            Some(&old),
            Some(&new),
        );
        Ok(new)
    }

    pub async fn delete_product(
        &self,
        ctx: &AuditContext,
        command: DeleteProductCommand,
    ) -> ApplicationResult<()> {
        let id = ProductId::new(command.id)?;
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("product not found"))?;

        self.repo.delete(id).await?;

        let old = ProductDto::from(existing);
        self.audit.record(
            ctx,
            AuditAction::Delete,
            AuditTarget::new(EntityType::Product, old.id, old.name.clone()),
            Some(&old),
            None,
        );
        Ok(())
    }
}
