use crate::domain::audit::cursor::AuditLogCursor;
use crate::domain::audit::entity::{AuditLog, EntityType, NewAuditLog};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<i64>,
}

/// Append-only store: there is deliberately no update or delete.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<()>;
    /// Newest first. Returns the page and the cursor of the next page, if any.
    async fn list(
        &self,
        filter: AuditLogFilter,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<AuditLogCursor>)>;
}
