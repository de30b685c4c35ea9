use crate::application::dto::AuthenticatedUser;
use crate::domain::audit::AuditLog;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

/// Request metadata stored next to each audit entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            ip_address: "unknown".into(),
            user_agent: "unknown".into(),
        }
    }
}

impl ClientInfo {
    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        let fallback = Self::default();
        Self {
            ip_address: ip_address.unwrap_or(fallback.ip_address),
            user_agent: user_agent.unwrap_or(fallback.user_agent),
        }
    }
}

/// Who performed a mutation and from where.
#[derive(Debug, Clone)]
pub struct AuditContext {
    pub actor: AuthenticatedUser,
    pub client: ClientInfo,
}

impl AuditContext {
    pub const fn new(actor: AuthenticatedUser, client: ClientInfo) -> Self {
        Self { actor, client }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogDto {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub entity_name: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub old_data: Option<serde_json::Value>,
    #[schema(value_type = Option<Object>)]
    pub new_data: Option<serde_json::Value>,
    #[schema(value_type = Option<Object>)]
    pub changes: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<AuditLog> for AuditLogDto {
    fn from(log: AuditLog) -> Self {
        let entry = log.entry;
        Self {
            id: log.id,
            user_id: entry.user_id.into(),
            user_name: entry.user_name,
            user_email: entry.user_email,
            action: entry.action.to_string(),
            entity_type: entry.entity_type.to_string(),
            entity_id: entry.entity_id,
            entity_name: entry.entity_name,
            old_data: entry.old_data,
            new_data: entry.new_data,
            changes: entry.changes,
            ip_address: entry.ip_address,
            user_agent: entry.user_agent,
            created_at: entry.created_at,
        }
    }
}
