use super::{AuditQueryService, common};
use crate::{
    application::{
        dto::{AuditLogDto, CursorPage},
        error::ApplicationResult,
    },
    domain::audit::{AuditLogCursor, AuditLogFilter, EntityType},
};

#[derive(Debug, Default)]
pub struct ListAuditLogsQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl AuditQueryService {
    pub async fn list_audit_logs(
        &self,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<CursorPage<AuditLogDto>> {
        let limit = common::normalize_limit(query.limit);
        let cursor = query
            .cursor
            .as_deref()
            .map(AuditLogCursor::decode)
            .transpose()?;
        let entity_type = query
            .entity_type
            .as_deref()
            .map(str::parse::<EntityType>)
            .transpose()?;

        let filter = AuditLogFilter {
            entity_type,
            entity_id: query.entity_id,
        };
        let (items, next_cursor) = self.repo.list(filter, limit, cursor).await?;
        let dtos: Vec<_> = items.into_iter().map(AuditLogDto::from).collect();
        Ok(CursorPage::new(
            dtos,
            next_cursor.map(|cursor| cursor.encode()),
        ))
    }
}
