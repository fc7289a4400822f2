use crate::domain::{
    Category, Farm, FarmDetail, FarmSummary, FieldViolation, NewFarm, Product, ProductDetail,
};
use crate::transport::http::handlers::{farms, health, products};
use crate::transport::http::types::{
    ApiResponse, AppState, FarmDeletedResponse, ProductDeletedResponse, ProductFilter, ProductForm,
};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        farms::list_farms_handler,
        farms::create_farm_handler,
        farms::get_farm_handler,
        farms::delete_farm_handler,
        farms::add_farm_product_handler,
        products::list_products_handler,
        products::create_product_handler,
        products::get_product_handler,
        products::update_product_handler,
        products::delete_product_handler,
        products::categories_handler
    ),
    components(schemas(
        ApiResponse,
        Category,
        Farm,
        FarmDetail,
        FarmSummary,
        FarmDeletedResponse,
        FieldViolation,
        NewFarm,
        Product,
        ProductDetail,
        ProductDeletedResponse,
        ProductFilter,
        ProductForm
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/farms",
            get(farms::list_farms_handler).post(farms::create_farm_handler),
        )
        .route(
            "/farms/:id",
            get(farms::get_farm_handler).delete(farms::delete_farm_handler),
        )
        .route("/farms/:id/products", post(farms::add_farm_product_handler))
        .route(
            "/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route(
            "/products/:id",
            get(products::get_product_handler)
                .put(products::update_product_handler)
                .delete(products::delete_product_handler),
        )
        .route("/categories", get(products::categories_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
