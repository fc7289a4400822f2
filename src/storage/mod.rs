//! Persistent store contract for farms and products, and its backends.

pub mod memory;
pub mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PostgresCatalogStore;

use crate::domain::{Category, Farm, Product};
use crate::error::CatalogResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Single-record operations on the two record kinds, plus batch delete by id set.
///
/// Every call is atomic on its own. Nothing here spans two calls; the catalog service
/// sequences multi-record work and owns the consequences of a half-applied sequence.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Cheap round-trip to check the backend is reachable.
    async fn ping(&self) -> CatalogResult<()>;

    async fn insert_farm(&self, farm: &Farm) -> CatalogResult<()>;
    async fn find_farm(&self, id: Uuid) -> CatalogResult<Option<Farm>>;
    async fn list_farms(&self) -> CatalogResult<Vec<Farm>>;
    /// Appends one id to the farm's product list in a single atomic write, so concurrent
    /// appends to the same farm never overwrite each other. Returns `false` if no farm has
    /// this id.
    async fn push_farm_product(&self, id: Uuid, product_id: Uuid) -> CatalogResult<bool>;
    /// Removes the farm and returns it as it was just before removal.
    async fn delete_farm(&self, id: Uuid) -> CatalogResult<Option<Farm>>;

    async fn insert_product(&self, product: &Product) -> CatalogResult<()>;
    async fn find_product(&self, id: Uuid) -> CatalogResult<Option<Product>>;
    /// Products whose id is in `ids`, in no particular order. Unknown ids are skipped.
    async fn find_products(&self, ids: &[Uuid]) -> CatalogResult<Vec<Product>>;
    /// All products, or those whose category equals `category`.
    async fn list_products(&self, category: Option<Category>) -> CatalogResult<Vec<Product>>;
    /// Replaces the stored record with the same id. Returns `false` if there is none.
    async fn replace_product(&self, product: &Product) -> CatalogResult<bool>;
    async fn delete_product(&self, id: Uuid) -> CatalogResult<Option<Product>>;
    /// Deletes every product whose id is in `ids` and returns how many were removed.
    async fn delete_products(&self, ids: &[Uuid]) -> CatalogResult<u64>;
}

/// Builds the backend selected by `config`. PostgreSQL connects and ensures the schema.
pub async fn open_store(
    config: &crate::infra::config::Config,
) -> anyhow::Result<std::sync::Arc<dyn CatalogStore>> {
    use crate::infra::config::StoreBackend;
    use anyhow::Context;

    Ok(match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store; data is lost on exit");
            std::sync::Arc::new(MemoryCatalogStore::new())
        }
        StoreBackend::Postgres => std::sync::Arc::new(
            PostgresCatalogStore::connect(&config.database_url, config.db_max_connections)
                .await
                .context("failed to connect to PostgreSQL")?,
        ),
    })
}
