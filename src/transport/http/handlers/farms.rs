use crate::domain::NewFarm;
use crate::transport::http::handlers::common::{parse_id, respond};
use crate::transport::http::types::{ApiError, AppState, FarmDeletedResponse, ProductForm};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

#[utoipa::path(
    get,
    path = "/farms",
    responses(
        (status = 200, description = "All farms", body = ApiResponse),
        (status = 500, description = "Store failure", body = ApiResponse)
    )
)]
pub async fn list_farms_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let farms = state.catalog.list_farms().await?;
    Ok(respond(StatusCode::OK, &farms))
}

#[utoipa::path(
    post,
    path = "/farms",
    request_body = NewFarm,
    responses(
        (status = 201, description = "Farm created", body = ApiResponse),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_farm_handler(
    State(state): State<AppState>,
    request: Result<Json<NewFarm>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(fields) = request
        .map_err(|e| ApiError::json(e, "{\"name\": ..., \"email\": ..., \"city\"?: ...}"))?;
    let farm = state.catalog.create_farm(fields).await?;
    Ok(respond(StatusCode::CREATED, &farm))
}

#[utoipa::path(
    get,
    path = "/farms/{id}",
    params(("id" = String, Path, description = "Farm id")),
    responses(
        (status = 200, description = "Farm with its products resolved", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 404, description = "Farm not found", body = ApiResponse)
    )
)]
pub async fn get_farm_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let detail = state.catalog.farm_detail(id).await?;
    Ok(respond(StatusCode::OK, &detail))
}

#[utoipa::path(
    delete,
    path = "/farms/{id}",
    params(("id" = String, Path, description = "Farm id")),
    responses(
        (status = 200, description = "Farm and its listed products deleted (no-op if absent)", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 500, description = "Store failure (the farm may already be gone)", body = ApiResponse)
    )
)]
pub async fn delete_farm_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let outcome = state.catalog.delete_farm(id).await?;
    Ok(respond(
        StatusCode::OK,
        &FarmDeletedResponse {
            deleted: outcome.farm.is_some(),
            cascaded_products: outcome.cascaded_products,
        },
    ))
}

#[utoipa::path(
    post,
    path = "/farms/{id}/products",
    params(("id" = String, Path, description = "Farm id")),
    request_body = ProductForm,
    responses(
        (status = 201, description = "Product created and linked to the farm", body = ApiResponse),
        (status = 400, description = "Validation failed or malformed id", body = ApiResponse),
        (status = 404, description = "Farm not found", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn add_farm_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<ProductForm>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let Json(form) = request
        .map_err(|e| ApiError::json(e, "{\"name\": ..., \"price\": ..., \"category\"?: ...}"))?;
    let product = state
        .catalog
        .add_product_to_farm(id, form.into_new_product()?)
        .await?;
    Ok(respond(StatusCode::CREATED, &product))
}
