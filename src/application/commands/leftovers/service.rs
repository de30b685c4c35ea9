// src/application/commands/leftovers/service.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuditContext, LeftOverDto},
        ports::time::Clock,
        services::{AuditRecorder, AuditTarget},
    },
    domain::{
        audit::{AuditAction, EntityType},
        inventory::InventoryLedger,
    },
};

pub struct LeftOverCommandService {
    pub(super) ledger: Arc<dyn InventoryLedger>,
    pub(super) audit: AuditRecorder,
    pub(super) clock: Arc<dyn Clock>,
}

impl LeftOverCommandService {
    pub fn new(
        ledger: Arc<dyn InventoryLedger>,
        audit: AuditRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ledger,
            audit,
            clock,
        }
    }

    pub(super) fn record(
        &self,
        ctx: &AuditContext,
        action: AuditAction,
        old: Option<&LeftOverDto>,
        new: Option<&LeftOverDto>,
    ) {
        let Some(subject) = new.or(old) else {
            return;
        };
        let target = AuditTarget::new(
            EntityType::LeftOver,
            subject.id,
            subject.custodian_name.clone(),
        );
        self.audit.record(ctx, action, target, old, new);
    }
}
