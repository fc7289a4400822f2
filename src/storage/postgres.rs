//! PostgreSQL-backed catalog store.
//!
//! Farms keep their product list as a `UUID[]` column, so list mutations are single-row
//! writes. Field constraints are repeated as `CHECK`/`NOT NULL` on the tables; a violation
//! surfaces as `CatalogError::Validation`.

use crate::domain::{Category, Farm, Product};
use crate::error::{CatalogError, CatalogResult};
use crate::storage::CatalogStore;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

const FARM_COLUMNS: &str = "id, name, city, email, products";
const PRODUCT_COLUMNS: &str = "id, name, price, category, farm_id";

#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and makes sure both tables exist.
    pub async fn connect(database_url: &str, max_connections: u32) -> CatalogResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> CatalogResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS farms (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL CHECK (btrim(name) <> ''),
                city TEXT,
                email TEXT NOT NULL CHECK (btrim(email) <> ''),
                products UUID[] NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&self.pool)
        .await?;

        // No foreign key on farm_id: the farm -> product cascade is driven by the service.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS products (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL CHECK (btrim(name) <> ''),
                price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
                category TEXT CHECK (category IN ('fruit', 'vegetable', 'dairy')),
                farm_id UUID,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS products_category_idx ON products (category)")
            .execute(&self.pool)
            .await?;

        info!("catalog schema ready");
        Ok(())
    }
}

fn farm_from_row(row: &PgRow) -> CatalogResult<Farm> {
    Ok(Farm {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        email: row.try_get("email")?,
        products: row.try_get("products")?,
    })
}

fn product_from_row(row: &PgRow) -> CatalogResult<Product> {
    let category: Option<String> = row.try_get("category")?;
    let category = category
        .map(|c| c.parse::<Category>())
        .transpose()
        .map_err(CatalogError::Store)?;
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        category,
        farm: row.try_get("farm_id")?,
    })
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn ping(&self) -> CatalogResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_farm(&self, farm: &Farm) -> CatalogResult<()> {
        sqlx::query(
            "INSERT INTO farms (id, name, city, email, products) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(farm.id)
        .bind(&farm.name)
        .bind(&farm.city)
        .bind(&farm.email)
        .bind(&farm.products)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_farm(&self, id: Uuid) -> CatalogResult<Option<Farm>> {
        let sql = format!("SELECT {} FROM farms WHERE id = $1", FARM_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(farm_from_row).transpose()
    }

    async fn list_farms(&self) -> CatalogResult<Vec<Farm>> {
        let sql = format!("SELECT {} FROM farms ORDER BY created_at, id", FARM_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(farm_from_row).collect()
    }

    async fn push_farm_product(&self, id: Uuid, product_id: Uuid) -> CatalogResult<bool> {
        let result = sqlx::query("UPDATE farms SET products = array_append(products, $2) WHERE id = $1")
            .bind(id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_farm(&self, id: Uuid) -> CatalogResult<Option<Farm>> {
        let sql = format!("DELETE FROM farms WHERE id = $1 RETURNING {}", FARM_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(farm_from_row).transpose()
    }

    async fn insert_product(&self, product: &Product) -> CatalogResult<()> {
        sqlx::query(
            "INSERT INTO products (id, name, price, category, farm_id) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.category.map(|c| c.as_str()))
        .bind(product.farm)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_product(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn find_products(&self, ids: &[Uuid]) -> CatalogResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {} FROM products WHERE id = ANY($1)", PRODUCT_COLUMNS);
        let rows = sqlx::query(&sql).bind(ids).fetch_all(&self.pool).await?;
        rows.iter().map(product_from_row).collect()
    }

    async fn list_products(&self, category: Option<Category>) -> CatalogResult<Vec<Product>> {
        let rows = match category {
            Some(c) => {
                let sql = format!(
                    "SELECT {} FROM products WHERE category = $1 ORDER BY created_at, id",
                    PRODUCT_COLUMNS
                );
                sqlx::query(&sql)
                    .bind(c.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM products ORDER BY created_at, id",
                    PRODUCT_COLUMNS
                );
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
        };
        rows.iter().map(product_from_row).collect()
    }

    async fn replace_product(&self, product: &Product) -> CatalogResult<bool> {
        let result = sqlx::query(
            "UPDATE products SET name = $2, price = $3, category = $4, farm_id = $5 WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.category.map(|c| c.as_str()))
        .bind(product.farm)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_product(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let sql = format!("DELETE FROM products WHERE id = $1 RETURNING {}", PRODUCT_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn delete_products(&self, ids: &[Uuid]) -> CatalogResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM products WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
