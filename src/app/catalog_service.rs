//! The catalog service.
//!
//! Every operation on farms and products goes through here. The service owns the two rules
//! that span both record kinds:
//! 1.  Deleting a farm deletes the products on its list (`delete_farm`).
//! 2.  Creating a product under a farm links both sides (`add_product_to_farm`).
//!
//! Neither rule is transactional. Each one is a sequence of independent store writes and a
//! failure part-way leaves the earlier writes in place; the failure is still returned.

use crate::domain::{
    Category, Farm, FarmDetail, FarmSummary, NewFarm, NewProduct, Product, ProductDetail,
    ProductUpdate, ValidationErrors,
};
use crate::error::{CatalogError, CatalogResult};
use crate::storage::CatalogStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Outcome of `delete_farm`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmDeletion {
    /// The removed farm, or `None` when the id did not resolve.
    pub farm: Option<Farm>,
    /// Number of products removed by the cascade. Diagnostic only.
    pub cascaded_products: u64,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    pub async fn ping(&self) -> CatalogResult<()> {
        self.store.ping().await
    }

    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    // --- Farms ---

    pub async fn list_farms(&self) -> CatalogResult<Vec<Farm>> {
        self.store.list_farms().await
    }

    pub async fn get_farm(&self, id: Uuid) -> CatalogResult<Farm> {
        self.store
            .find_farm(id)
            .await?
            .ok_or_else(|| CatalogError::farm_not_found(id))
    }

    /// The farm with its product list resolved, in list order.
    pub async fn farm_detail(&self, id: Uuid) -> CatalogResult<FarmDetail> {
        let farm = self.get_farm(id).await?;
        let products = self.store.find_products(&farm.products).await?;
        Ok(FarmDetail::populate(farm, products))
    }

    pub async fn create_farm(&self, fields: NewFarm) -> CatalogResult<Farm> {
        let farm = fields.into_farm(Uuid::new_v4())?;
        self.store.insert_farm(&farm).await?;
        info!(farm_id = %farm.id, name = %farm.name, "farm created");
        Ok(farm)
    }

    /// Deletes the farm, then every product on its list in one batch.
    ///
    /// An unknown id is a successful no-op. If the batch delete fails the farm is already
    /// gone and its products are left orphaned; the error is returned all the same.
    pub async fn delete_farm(&self, id: Uuid) -> CatalogResult<FarmDeletion> {
        let Some(farm) = self.store.delete_farm(id).await? else {
            debug!(farm_id = %id, "delete_farm: no such farm");
            return Ok(FarmDeletion {
                farm: None,
                cascaded_products: 0,
            });
        };

        let cascaded_products = if farm.products.is_empty() {
            0
        } else {
            match self.store.delete_products(&farm.products).await {
                Ok(n) => n,
                Err(e) => {
                    warn!(
                        farm_id = %id,
                        orphaned = ?farm.products,
                        error = %e,
                        "farm deleted but product cascade failed"
                    );
                    return Err(e);
                }
            }
        };

        info!(farm_id = %id, cascaded_products, "farm deleted");
        Ok(FarmDeletion {
            farm: Some(farm),
            cascaded_products,
        })
    }

    /// Creates a product under an existing farm and links both records.
    ///
    /// The farm's list is written first, then the product is inserted. Nothing is written
    /// if the farm is missing or the fields are invalid. If the insert fails after the farm
    /// write, the farm keeps an id that resolves to nothing.
    pub async fn add_product_to_farm(
        &self,
        farm_id: Uuid,
        fields: NewProduct,
    ) -> CatalogResult<Product> {
        let farm = self.get_farm(farm_id).await?;
        let product = fields.into_product(Uuid::new_v4(), Some(farm.id))?;

        if !self.store.push_farm_product(farm.id, product.id).await? {
            // Deleted between the read and the write.
            return Err(CatalogError::farm_not_found(farm_id));
        }

        if let Err(e) = self.store.insert_product(&product).await {
            warn!(
                farm_id = %farm_id,
                product_id = %product.id,
                error = %e,
                "farm lists a product that failed to insert"
            );
            return Err(e);
        }

        info!(farm_id = %farm_id, product_id = %product.id, "product added to farm");
        Ok(product)
    }

    // --- Products ---

    /// All products, or those in `category`. The filter is normalized like stored values.
    pub async fn list_products(&self, category: Option<&str>) -> CatalogResult<Vec<Product>> {
        let category = Category::parse_optional(category)
            .map_err(|msg| ValidationErrors::single("category", msg))?;
        self.store.list_products(category).await
    }

    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        self.store
            .find_product(id)
            .await?
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    /// The product with its owning farm resolved to a summary, if the farm still exists.
    pub async fn product_detail(&self, id: Uuid) -> CatalogResult<ProductDetail> {
        let product = self.get_product(id).await?;
        let farm = match product.farm {
            Some(farm_id) => self.store.find_farm(farm_id).await?,
            None => None,
        };
        Ok(ProductDetail::populate(product, farm.as_ref().map(FarmSummary::from)))
    }

    /// Creates a product that belongs to no farm.
    pub async fn create_product(&self, fields: NewProduct) -> CatalogResult<Product> {
        let product = fields.into_product(Uuid::new_v4(), None)?;
        self.store.insert_product(&product).await?;
        info!(product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    pub async fn update_product(&self, id: Uuid, update: ProductUpdate) -> CatalogResult<Product> {
        let current = self.get_product(id).await?;
        let updated = current.apply_update(update)?;
        if !self.store.replace_product(&updated).await? {
            return Err(CatalogError::product_not_found(id));
        }
        debug!(product_id = %id, "product updated");
        Ok(updated)
    }

    /// Deletes one product. Farm product lists are left as they are.
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let deleted = self.store.delete_product(id).await?;
        match &deleted {
            Some(p) => info!(product_id = %id, farm_id = ?p.farm, "product deleted"),
            None => debug!(product_id = %id, "delete_product: no such product"),
        }
        Ok(deleted)
    }
}
