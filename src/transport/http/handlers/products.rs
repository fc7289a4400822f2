use crate::transport::http::handlers::common::{parse_id, respond};
use crate::transport::http::types::{
    ApiError, AppState, ProductDeletedResponse, ProductFilter, ProductForm,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde_json::json;

const PRODUCT_BODY: &str = "{\"name\": ..., \"price\": ..., \"category\"?: ...}";

#[utoipa::path(
    get,
    path = "/products",
    params(("category" = Option<String>, Query, description = "Only products in this category")),
    responses(
        (status = 200, description = "Products, optionally filtered", body = ApiResponse),
        (status = 400, description = "Unknown category", body = ApiResponse)
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Response, ApiError> {
    let products = state
        .catalog
        .list_products(filter.category.as_deref())
        .await?;
    let category = filter
        .category
        .as_deref()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "All".to_string());
    Ok(respond(
        StatusCode::OK,
        &json!({ "category": category, "products": products }),
    ))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductForm,
    responses(
        (status = 201, description = "Product created", body = ApiResponse),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    request: Result<Json<ProductForm>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(form) = request.map_err(|e| ApiError::json(e, PRODUCT_BODY))?;
    let product = state.catalog.create_product(form.into_new_product()?).await?;
    Ok(respond(StatusCode::CREATED, &product))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with its farm summary", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 404, description = "Product not found", body = ApiResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let detail = state.catalog.product_detail(id).await?;
    Ok(respond(StatusCode::OK, &detail))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductForm,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse),
        (status = 400, description = "Validation failed or malformed id", body = ApiResponse),
        (status = 404, description = "Product not found", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<ProductForm>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let Json(form) = request.map_err(|e| ApiError::json(e, PRODUCT_BODY))?;
    let product = state.catalog.update_product(id, form.into_update()?).await?;
    Ok(respond(StatusCode::OK, &product))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted (no-op if absent); farm lists are not touched", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state.catalog.delete_product(id).await?;
    Ok(respond(
        StatusCode::OK,
        &ProductDeletedResponse {
            deleted: deleted.is_some(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses((status = 200, description = "The fixed product categories", body = ApiResponse))
)]
pub async fn categories_handler(State(state): State<AppState>) -> Response {
    respond(StatusCode::OK, &state.catalog.categories())
}
