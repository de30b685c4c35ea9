// src/presentation/http/openapi.rs
use crate::application::dto::AuditLogDto;
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};

pub const DEFAULT_SNAPSHOT_PATH: &str = "spec/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

/// Body of every successful delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogListResponse {
    pub items: Vec<AuditLogDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::products::list_products,
        crate::presentation::http::controllers::products::get_product,
        crate::presentation::http::controllers::products::create_product,
        crate::presentation::http::controllers::products::update_product,
        crate::presentation::http::controllers::products::restock_product,
        crate::presentation::http::controllers::products::delete_product,
        crate::presentation::http::controllers::categories::list_categories,
        crate::presentation::http::controllers::categories::get_category,
        crate::presentation::http::controllers::categories::create_category,
        crate::presentation::http::controllers::categories::update_category,
        crate::presentation::http::controllers::categories::delete_category,
        crate::presentation::http::controllers::leftovers::list_leftovers,
        crate::presentation::http::controllers::leftovers::get_leftover,
        crate::presentation::http::controllers::leftovers::create_leftover,
        crate::presentation::http::controllers::leftovers::update_leftover,
        crate::presentation::http::controllers::leftovers::delete_leftover,
        crate::presentation::http::controllers::audit::list_audit_logs,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            SuccessResponse,
            AuditLogListResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::products::ProductRequest,
            crate::presentation::http::controllers::products::RestockRequest,
            crate::presentation::http::controllers::categories::CategoryRequest,
            crate::presentation::http::controllers::leftovers::LeftOverRequest,
            crate::application::dto::ProductDto,
            crate::application::dto::CategoryDto,
            crate::application::dto::LeftOverDto,
            crate::application::dto::LeftOverDetailDto,
            crate::application::dto::AuditLogDto
        )
    ),
    tags(
        (name = "Products", description = "Product catalog"),
        (name = "Categories", description = "Product categories"),
        (name = "Leftovers", description = "Stock held by custodians"),
        (name = "Audit", description = "Change history"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Stockroom API",
        description = "Back-office inventory service",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    let redoc = Redoc::with_url("/redoc", ApiDoc::openapi());
    Router::new()
        .route("/openapi.json", get(serve_openapi))
        .merge(redoc)
        .route("/", get(|| async { Redirect::temporary("/redoc") }))
}

/// Write the OpenAPI document to `OPENAPI_SNAPSHOT_PATH` (or
/// [`DEFAULT_SNAPSHOT_PATH`]) and return the path used.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).expect("serialize");
        let paths = doc["paths"].as_object().expect("paths");
        for path in [
            "/health",
            "/api/v1/products",
            "/api/v1/products/{id}",
            "/api/v1/products/{id}/stock",
            "/api/v1/categories",
            "/api/v1/categories/{id}",
            "/api/v1/leftovers",
            "/api/v1/leftovers/{id}",
            "/api/v1/audit-logs",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert!(doc["components"]["securitySchemes"]["bearerAuth"].is_object());
    }
}
