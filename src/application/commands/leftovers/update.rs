// src/application/commands/leftovers/update.rs
use super::LeftOverCommandService;
use crate::{
    application::{
        dto::{AuditContext, LeftOverDto},
        error::ApplicationResult,
    },
    domain::{
        audit::AuditAction,
        leftover::{Custodian, LeftOverId, LeftOverUpdate, Quantity},
        product::ProductId,
    },
};

pub struct UpdateLeftOverCommand {
    pub id: i64,
    pub product_id: i64,
    pub custodian_name: String,
    pub custodian_location: String,
    pub quantity: i32,
}

impl LeftOverCommandService {
    /// Edit a leftover. Moving it to another product credits the old product
    /// and debits the new one in the same ledger transaction.
    pub async fn update_leftover(
        &self,
        ctx: &AuditContext,
        command: UpdateLeftOverCommand,
    ) -> ApplicationResult<LeftOverDto> {
        let id = LeftOverId::new(command.id)?;
        let custodian = Custodian::new(command.custodian_name, command.custodian_location)?;
        let product_id = ProductId::new(command.product_id)?;
        let quantity = Quantity::new(command.quantity)?;

        let change = self
            .ledger
            .reconcile(LeftOverUpdate {
                id,
                product_id,
                custodian,
                quantity,
                updated_at: self.clock.now(),
            })
            .await?;

        let old = LeftOverDto::from(change.previous);
        let new = LeftOverDto::from(change.current);
        self.record(ctx, AuditAction::Update, Some(&old), Some(&new));
        Ok(new)
    }
}
