use super::map_sqlx;
use crate::domain::audit::{
    AuditLog, AuditLogCursor, AuditLogFilter, AuditLogRepository, NewAuditLog,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    user_id: i64,
    user_name: Option<String>,
    user_email: Option<String>,
    action: String,
    entity_type: String,
    entity_id: i64,
    entity_name: Option<String>,
    old_data: Option<serde_json::Value>,
    new_data: Option<serde_json::Value>,
    changes: Option<serde_json::Value>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditLogRow> for AuditLog {
    type Error = DomainError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            entry: NewAuditLog {
                user_id: UserId::new(row.user_id)?,
                user_name: row.user_name,
                user_email: row.user_email,
                action: row.action.parse()?,
                entity_type: row.entity_type.parse()?,
                entity_id: row.entity_id,
                entity_name: row.entity_name,
                old_data: row.old_data,
                new_data: row.new_data,
                changes: row.changes,
                ip_address: row.ip_address,
                user_agent: row.user_agent,
                created_at: row.created_at,
            },
        })
    }
}

impl PostgresAuditLogRepository {
    fn apply_conditions<'a>(
        builder: &mut QueryBuilder<'a, Postgres>,
        filter: &AuditLogFilter,
        cursor: Option<&AuditLogCursor>,
    ) {
        let mut has_where = false;
        let mut next_clause = |builder: &mut QueryBuilder<'a, Postgres>| {
            builder.push(if has_where { " AND " } else { " WHERE " });
            has_where = true;
        };

        if let Some(entity_type) = filter.entity_type {
            next_clause(builder);
            builder.push("entity_type = ");
            builder.push_bind(entity_type.as_str());
        }

        if let Some(entity_id) = filter.entity_id {
            next_clause(builder);
            builder.push("entity_id = ");
            builder.push_bind(entity_id);
        }

        if let Some(cursor) = cursor {
            next_clause(builder);
            builder.push("(created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<()> {
        sqlx::query(
            r"
            INSERT INTO audit_logs (user_id, user_name, user_email, action, entity_type, entity_id,
                entity_name, old_data, new_data, changes, ip_address, user_agent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(i64::from(log.user_id))
        .bind(log.user_name)
        .bind(log.user_email)
        .bind(log.action.as_str())
        .bind(log.entity_type.as_str())
        .bind(log.entity_id)
        .bind(log.entity_name)
        .bind(log.old_data)
        .bind(log.new_data)
        .bind(log.changes)
        .bind(log.ip_address)
        .bind(log.user_agent)
        .bind(log.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn list(
        &self,
        filter: AuditLogFilter,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<AuditLogCursor>)> {
        let limit = limit.clamp(1, 100);
        let fetch_limit = i64::from(limit) + 1;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, user_id, user_name, user_email, action, entity_type, entity_id, entity_name,
                old_data, new_data, changes, ip_address, user_agent, created_at
             FROM audit_logs",
        );
        Self::apply_conditions(&mut builder, &filter, cursor.as_ref());
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(fetch_limit);

        let rows = builder
            .build_query_as::<AuditLogRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut logs = rows
            .into_iter()
            .map(AuditLog::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut next_cursor = None;
        if logs.len() > limit as usize {
            logs.pop();
            if let Some(last) = logs.last() {
                next_cursor = Some(AuditLogCursor::new(last.entry.created_at, last.id));
            }
        }

        Ok((logs, next_cursor))
    }
}
