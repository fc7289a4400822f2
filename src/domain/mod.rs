//! Farm and product records, and the field constraints enforced on every write.

pub mod category;
pub mod farm;
pub mod product;
pub mod validation;

pub use category::Category;
pub use farm::{Farm, FarmDetail, FarmSummary, NewFarm};
pub use product::{NewProduct, Product, ProductDetail, ProductUpdate};
pub use validation::{FieldViolation, ValidationErrors};
