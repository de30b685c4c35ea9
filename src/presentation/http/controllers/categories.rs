// src/presentation/http/controllers/categories.rs
use crate::application::{
    commands::categories::{CreateCategoryCommand, DeleteCategoryCommand, UpdateCategoryCommand},
    dto::CategoryDto,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{AppJson, Audited};
use crate::presentation::http::openapi::SuccessResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryRequest {
    fn into_parts(self) -> (String, String) {
        (
            self.name.unwrap_or_default(),
            self.description.unwrap_or_default(),
        )
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "All categories ordered by name.", body = [CategoryDto])
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<CategoryDto>>> {
    let categories = state
        .services
        .category_queries
        .list_categories()
        .await
        .into_http()?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category.", body = CategoryDto),
        (status = 404, description = "Category not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn get_category(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<CategoryDto>> {
    let category = state
        .services
        .category_queries
        .get_category(id)
        .await
        .into_http()?;
    Ok(Json(category))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category created.", body = CategoryDto),
        (status = 400, description = "Missing fields or duplicate name.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    Extension(state): Extension<HttpState>,
    Audited(ctx): Audited,
    AppJson(payload): AppJson<CategoryRequest>,
) -> HttpResult<Json<CategoryDto>> {
    let (name, description) = payload.into_parts();
    let category = state
        .services
        .category_commands
        .create_category(&ctx, CreateCategoryCommand { name, description })
        .await
        .into_http()?;
    Ok(Json(category))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated.", body = CategoryDto),
        (status = 400, description = "Missing fields or duplicate name.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Category not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Categories"
)]
pub async fn update_category(
    Extension(state): Extension<HttpState>,
    Audited(ctx): Audited,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<CategoryRequest>,
) -> HttpResult<Json<CategoryDto>> {
    let (name, description) = payload.into_parts();
    let category = state
        .services
        .category_commands
        .update_category(
            &ctx,
            UpdateCategoryCommand {
                id,
                name,
                description,
            },
        )
        .await
        .into_http()?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category deleted.", body = SuccessResponse),
        (status = 401, description = "Admin role required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Category not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    Extension(state): Extension<HttpState>,
    Audited(ctx): Audited,
    Path(id): Path<i64>,
) -> HttpResult<Json<SuccessResponse>> {
    state
        .services
        .category_commands
        .delete_category(&ctx, DeleteCategoryCommand { id })
        .await
        .into_http()?;
    Ok(Json(SuccessResponse::ok()))
}
