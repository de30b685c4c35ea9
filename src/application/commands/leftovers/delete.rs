// src/application/commands/leftovers/delete.rs
use super::LeftOverCommandService;
use crate::{
    application::{
        dto::{AuditContext, LeftOverDto},
        error::ApplicationResult,
    },
    domain::{audit::AuditAction, leftover::LeftOverId},
};

pub struct DeleteLeftOverCommand {
    pub id: i64,
}

impl LeftOverCommandService {
    /// Delete a leftover; its quantity always returns to the product.
    pub async fn delete_leftover(
        &self,
        ctx: &AuditContext,
        command: DeleteLeftOverCommand,
    ) -> ApplicationResult<()> {
        let id = LeftOverId::new(command.id)?;
        let released = self.ledger.release(id, self.clock.now()).await?;

        let old = LeftOverDto::from(released);
        self.record(ctx, AuditAction::Delete, Some(&old), None);
        Ok(())
    }
}
