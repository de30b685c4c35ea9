// src/presentation/http/controllers/products.rs
use crate::application::{
    ApplicationResult,
    commands::products::{
        CreateProductCommand, DeleteProductCommand, ProductInput, RestockProductCommand,
        UpdateProductCommand,
    },
    dto::ProductDto,
    error::ApplicationError,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{AppJson, Audited};
use crate::presentation::http::lenient;
use crate::presentation::http::openapi::SuccessResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub product_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    #[schema(value_type = Option<String>, example = "19.99")]
    pub price: Option<Decimal>,
    /// Initial stock. Ignored on update; use the stock endpoint instead.
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub stock: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "type")]
    pub product_type: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub color_variants: Option<Value>,
}

impl ProductRequest {
    fn into_input(self) -> ApplicationResult<(ProductInput, Option<i32>)> {
        let (Some(name), Some(price)) = (self.name, self.price) else {
            return Err(ApplicationError::validation("name and price are required"));
        };
        let input = ProductInput {
            name,
            product_number: self.product_number,
            description: self.description,
            price,
            category: self.category,
            location: self.location,
            product_type: self.product_type,
            images: self.images,
            color_variants: self.color_variants,
        };
        Ok((input, self.stock))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestockRequest {
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub stock: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "All products ordered by name.", body = [ProductDto]),
        (status = 500, description = "Unexpected server error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn list_products(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<ProductDto>>> {
    let products = state.services.product_queries.list_products().await.into_http()?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product.", body = ProductDto),
        (status = 404, description = "Product not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<ProductDto>> {
    let product = state.services.product_queries.get_product(id).await.into_http()?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product created.", body = ProductDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    Extension(state): Extension<HttpState>,
    Audited(ctx): Audited,
    AppJson(payload): AppJson<ProductRequest>,
) -> HttpResult<Json<ProductDto>> {
    let (input, stock) = payload.into_input().into_http()?;
    let product = state
        .services
        .product_commands
        .create_product(
            &ctx,
            CreateProductCommand {
                input,
                stock: stock.unwrap_or(0),
            },
        )
        .await
        .into_http()?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated.", body = ProductDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Product not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Products"
)]
pub async fn update_product(
    Extension(state): Extension<HttpState>,
    Audited(ctx): Audited,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<ProductRequest>,
) -> HttpResult<Json<ProductDto>> {
    let (input, _) = payload.into_input().into_http()?;
    let product = state
        .services
        .product_commands
        .update_product(&ctx, UpdateProductCommand { id, input })
        .await
        .into_http()?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}/stock",
    params(("id" = i64, Path, description = "Product identifier")),
    request_body = RestockRequest,
    responses(
        (status = 200, description = "Stock set.", body = ProductDto),
        (status = 400, description = "Invalid stock.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Product not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Products"
)]
pub async fn restock_product(
    Extension(state): Extension<HttpState>,
    Audited(ctx): Audited,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<RestockRequest>,
) -> HttpResult<Json<ProductDto>> {
    let stock = payload
        .stock
        .ok_or_else(|| ApplicationError::validation("stock is required"))
        .into_http()?;
    let product = state
        .services
        .product_commands
        .restock_product(&ctx, RestockProductCommand { id, stock })
        .await
        .into_http()?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product deleted.", body = SuccessResponse),
        (status = 400, description = "Product still has leftover records.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Product not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    Extension(state): Extension<HttpState>,
    Audited(ctx): Audited,
    Path(id): Path<i64>,
) -> HttpResult<Json<SuccessResponse>> {
    state
        .services
        .product_commands
        .delete_product(&ctx, DeleteProductCommand { id })
        .await
        .into_http()?;
    Ok(Json(SuccessResponse::ok()))
}
