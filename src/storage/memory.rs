//! In-process store backed by insertion-ordered vectors.

use crate::domain::{Category, Farm, Product};
use crate::error::CatalogResult;
use crate::storage::CatalogStore;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Collections {
    farms: Vec<Farm>,
    products: Vec<Product>,
}

/// A store that lives as long as the process. Listing order is insertion order.
#[derive(Default)]
pub struct MemoryCatalogStore {
    inner: RwLock<Collections>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn ping(&self) -> CatalogResult<()> {
        Ok(())
    }

    async fn insert_farm(&self, farm: &Farm) -> CatalogResult<()> {
        self.inner.write().await.farms.push(farm.clone());
        Ok(())
    }

    async fn find_farm(&self, id: Uuid) -> CatalogResult<Option<Farm>> {
        let inner = self.inner.read().await;
        let farm = inner.farms.iter().find(|f| f.id == id).cloned();
        Ok(farm)
    }

    async fn list_farms(&self) -> CatalogResult<Vec<Farm>> {
        Ok(self.inner.read().await.farms.clone())
    }

    async fn push_farm_product(&self, id: Uuid, product_id: Uuid) -> CatalogResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.farms.iter_mut().find(|f| f.id == id) {
            Some(farm) => {
                farm.products.push(product_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_farm(&self, id: Uuid) -> CatalogResult<Option<Farm>> {
        let mut inner = self.inner.write().await;
        let removed = match inner.farms.iter().position(|f| f.id == id) {
            Some(i) => Some(inner.farms.remove(i)),
            None => None,
        };
        Ok(removed)
    }

    async fn insert_product(&self, product: &Product) -> CatalogResult<()> {
        self.inner.write().await.products.push(product.clone());
        Ok(())
    }

    async fn find_product(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let inner = self.inner.read().await;
        let product = inner.products.iter().find(|p| p.id == id).cloned();
        Ok(product)
    }

    async fn find_products(&self, ids: &[Uuid]) -> CatalogResult<Vec<Product>> {
        let inner = self.inner.read().await;
        let found = inner
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect();
        Ok(found)
    }

    async fn list_products(&self, category: Option<Category>) -> CatalogResult<Vec<Product>> {
        let inner = self.inner.read().await;
        let listed = inner
            .products
            .iter()
            .filter(|p| category.is_none() || p.category == category)
            .cloned()
            .collect();
        Ok(listed)
    }

    async fn replace_product(&self, product: &Product) -> CatalogResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.products.iter_mut().find(|p| p.id == product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_product(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let mut inner = self.inner.write().await;
        let removed = match inner.products.iter().position(|p| p.id == id) {
            Some(i) => Some(inner.products.remove(i)),
            None => None,
        };
        Ok(removed)
    }

    async fn delete_products(&self, ids: &[Uuid]) -> CatalogResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.products.len();
        inner.products.retain(|p| !ids.contains(&p.id));
        Ok((before - inner.products.len()) as u64)
    }
}
