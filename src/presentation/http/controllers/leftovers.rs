// src/presentation/http/controllers/leftovers.rs
use crate::application::{
    ApplicationResult,
    commands::leftovers::{CreateLeftOverCommand, DeleteLeftOverCommand, UpdateLeftOverCommand},
    dto::{LeftOverDetailDto, LeftOverDto},
    error::ApplicationError,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{AppJson, Audited};
use crate::presentation::http::lenient;
use crate::presentation::http::openapi::SuccessResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use serde::Deserialize;
use utoipa::ToSchema;

/// Body of leftover create and edit. Every field is required.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeftOverRequest {
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub custodian_name: Option<String>,
    #[serde(default)]
    pub custodian_location: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub quantity: Option<i32>,
}

struct LeftOverFields {
    product_id: i64,
    custodian_name: String,
    custodian_location: String,
    quantity: i32,
}

impl LeftOverRequest {
    fn require_all(self) -> ApplicationResult<LeftOverFields> {
        match (
            self.product_id,
            self.custodian_name,
            self.custodian_location,
            self.quantity,
        ) {
            (Some(product_id), Some(custodian_name), Some(custodian_location), Some(quantity)) => {
                Ok(LeftOverFields {
                    product_id,
                    custodian_name,
                    custodian_location,
                    quantity,
                })
            }
            _ => Err(ApplicationError::validation("all fields are required")),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/leftovers",
    responses(
        (status = 200, description = "Leftover records, newest first, with their products.", body = [LeftOverDetailDto]),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Leftovers"
)]
pub async fn list_leftovers(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<LeftOverDetailDto>>> {
    let rows = state
        .services
        .leftover_queries
        .list_leftovers()
        .await
        .into_http()?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/v1/leftovers/{id}",
    params(("id" = i64, Path, description = "Leftover identifier")),
    responses(
        (status = 200, description = "Leftover record with its product.", body = LeftOverDetailDto),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Leftover not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Leftovers"
)]
pub async fn get_leftover(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<LeftOverDetailDto>> {
    let row = state
        .services
        .leftover_queries
        .get_leftover(id)
        .await
        .into_http()?;
    Ok(Json(row))
}

#[utoipa::path(
    post,
    path = "/api/v1/leftovers",
    request_body = LeftOverRequest,
    responses(
        (status = 200, description = "Leftover created and stock reserved.", body = LeftOverDto),
        (status = 400, description = "Missing fields or insufficient stock.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Product not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Leftovers"
)]
pub async fn create_leftover(
    Extension(state): Extension<HttpState>,
    Audited(ctx): Audited,
    AppJson(payload): AppJson<LeftOverRequest>,
) -> HttpResult<Json<LeftOverDto>> {
    let fields = payload.require_all().into_http()?;
    let leftover = state
        .services
        .leftover_commands
        .create_leftover(
            &ctx,
            CreateLeftOverCommand {
                product_id: fields.product_id,
                custodian_name: fields.custodian_name,
                custodian_location: fields.custodian_location,
                quantity: fields.quantity,
            },
        )
        .await
        .into_http()?;
    Ok(Json(leftover))
}

#[utoipa::path(
    put,
    path = "/api/v1/leftovers/{id}",
    params(("id" = i64, Path, description = "Leftover identifier")),
    request_body = LeftOverRequest,
    responses(
        (status = 200, description = "Leftover updated and stock reconciled.", body = LeftOverDto),
        (status = 400, description = "Missing fields or insufficient stock.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Leftover or product not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Leftovers"
)]
pub async fn update_leftover(
    Extension(state): Extension<HttpState>,
    Audited(ctx): Audited,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<LeftOverRequest>,
) -> HttpResult<Json<LeftOverDto>> {
    let fields = payload.require_all().into_http()?;
    let leftover = state
        .services
        .leftover_commands
        .update_leftover(
            &ctx,
            UpdateLeftOverCommand {
                id,
                product_id: fields.product_id,
                custodian_name: fields.custodian_name,
                custodian_location: fields.custodian_location,
                quantity: fields.quantity,
            },
        )
        .await
        .into_http()?;
    Ok(Json(leftover))
}

#[utoipa::path(
    delete,
    path = "/api/v1/leftovers/{id}",
    params(("id" = i64, Path, description = "Leftover identifier")),
    responses(
        (status = 200, description = "Leftover deleted and stock restored.", body = SuccessResponse),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Leftover not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Leftovers"
)]
pub async fn delete_leftover(
    Extension(state): Extension<HttpState>,
    Audited(ctx): Audited,
    Path(id): Path<i64>,
) -> HttpResult<Json<SuccessResponse>> {
    state
        .services
        .leftover_commands
        .delete_leftover(&ctx, DeleteLeftOverCommand { id })
        .await
        .into_http()?;
    Ok(Json(SuccessResponse::ok()))
}
