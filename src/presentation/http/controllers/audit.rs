// src/presentation/http/controllers/audit.rs
use crate::application::dto::{AuditLogDto, CursorPage};
use crate::application::queries::audit::ListAuditLogsQuery;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::openapi::AuditLogListResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListAuditParams {
    /// `PRODUCT`, `CATEGORY` or `LEFTOVER`.
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub entity_id: Option<i64>,
    /// Page size, default 20, at most 100.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Opaque cursor from a previous page.
    #[serde(default)]
    pub cursor: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs",
    params(ListAuditParams),
    responses(
        (status = 200, description = "Audit entries, newest first.", body = AuditLogListResponse),
        (status = 400, description = "Invalid cursor or entity type.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListAuditParams>,
) -> HttpResult<Json<CursorPage<AuditLogDto>>> {
    let page = state
        .services
        .audit_queries
        .list_audit_logs(ListAuditLogsQuery {
            entity_type: params.entity_type,
            entity_id: params.entity_id,
            limit: params.limit,
            cursor: params.cursor,
        })
        .await
        .into_http()?;
    Ok(Json(page))
}
