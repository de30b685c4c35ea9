// src/application/commands/leftovers/create.rs
use super::LeftOverCommandService;
use crate::{
    application::{
        dto::{AuditContext, LeftOverDto},
        error::ApplicationResult,
    },
    domain::{
        audit::AuditAction,
        leftover::{Custodian, NewLeftOver, Quantity},
        product::ProductId,
    },
};

pub struct CreateLeftOverCommand {
    pub product_id: i64,
    pub custodian_name: String,
    pub custodian_location: String,
    pub quantity: i32,
}

impl LeftOverCommandService {
    /// Hand units of a product to a custodian, debiting nominal stock.
    pub async fn create_leftover(
        &self,
        ctx: &AuditContext,
        command: CreateLeftOverCommand,
    ) -> ApplicationResult<LeftOverDto> {
        let custodian = Custodian::new(command.custodian_name, command.custodian_location)?;
        let product_id = ProductId::new(command.product_id)?;
        let quantity = Quantity::new(command.quantity)?;

        let created = self
            .ledger
            .reserve(NewLeftOver {
                product_id,
                custodian,
                quantity,
                created_at: self.clock.now(),
            })
            .await?;

        let dto = LeftOverDto::from(created);
        self.record(ctx, AuditAction::Create, None, Some(&dto));
        Ok(dto)
    }
}
