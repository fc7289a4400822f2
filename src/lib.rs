pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::catalog_service::{CatalogService, FarmDeletion};
pub use domain::{Category, Farm, NewFarm, NewProduct, Product, ProductUpdate};
pub use error::{CatalogError, CatalogResult};
pub use storage::{CatalogStore, MemoryCatalogStore, PostgresCatalogStore};
