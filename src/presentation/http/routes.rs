// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{audit, categories, leftovers, products},
    middleware::require_admin,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

fn public_routes() -> Router {
    Router::new()
        .route("/api/v1/products", get(products::list_products))
        .route("/api/v1/products/{id}", get(products::get_product))
        .route("/api/v1/categories", get(categories::list_categories))
        .route("/api/v1/categories/{id}", get(categories::get_category))
}

fn admin_routes() -> Router {
    Router::new()
        .route("/api/v1/products", post(products::create_product))
        .route(
            "/api/v1/products/{id}",
            put(products::update_product).delete(products::delete_product),
        )
        .route("/api/v1/products/{id}/stock", put(products::restock_product))
        .route("/api/v1/categories", post(categories::create_category))
        .route(
            "/api/v1/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/api/v1/leftovers",
            get(leftovers::list_leftovers).post(leftovers::create_leftover),
        )
        .route(
            "/api/v1/leftovers/{id}",
            get(leftovers::get_leftover)
                .put(leftovers::update_leftover)
                .delete(leftovers::delete_leftover),
        )
        .route("/api/v1/audit-logs", get(audit::list_audit_logs))
        .route_layer(middleware::from_fn(require_admin))
}

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(public_routes())
        .merge(admin_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
