// src/bin/api_server.rs

use farm_stand::infra::{config::Config, telemetry};
use farm_stand::{storage, transport, CatalogService};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let config = Config::from_env()?;

    // --- Store Initialization ---
    info!(backend = ?config.store_backend, "initializing catalog store");
    let store = storage::open_store(&config).await?;
    let app_state = transport::http::AppState {
        catalog: CatalogService::new(store),
    };
    info!("catalog store ready");

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("API server listening on http://{}", listener.local_addr()?);
    info!("Swagger UI available at http://{}/swagger-ui", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    info!("graceful shutdown complete");
    Ok(())
}
