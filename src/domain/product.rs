//! Product records and their field constraints.

use crate::domain::category::Category;
use crate::domain::farm::FarmSummary;
use crate::domain::validation::{require_text, ValidationErrors};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<Category>,
    /// Owning farm, set only by nested creation.
    #[serde(default)]
    pub farm: Option<Uuid>,
}

/// Fields accepted when creating a product, standalone or under a farm.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, category: Option<&str>) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            category: category.map(str::to_string),
        }
    }

    /// Validates the fields and builds the product record.
    pub fn into_product(self, id: Uuid, farm: Option<Uuid>) -> Result<Product, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = require_text(&mut errors, "name", &self.name, "name cannot be blank");
        let price = check_price(&mut errors, self.price);
        let category = check_category(&mut errors, self.category.as_deref());

        errors.finish(Product {
            id,
            name,
            price,
            category,
            farm,
        })
    }
}

/// Field-level replacement for an existing product. Absent fields keep their stored value;
/// a blank `category` clears it.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    /// Applies `update` and re-validates the merged record. The farm reference is kept.
    pub fn apply_update(&self, update: ProductUpdate) -> Result<Product, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = match update.name.as_deref() {
            Some(raw) => require_text(&mut errors, "name", raw, "name cannot be blank"),
            None => self.name.clone(),
        };
        let price = check_price(&mut errors, Some(update.price.unwrap_or(self.price)));
        let category = match update.category.as_deref() {
            Some(raw) => check_category(&mut errors, Some(raw)),
            None => self.category,
        };

        errors.finish(Product {
            id: self.id,
            name,
            price,
            category,
            farm: self.farm,
        })
    }
}

fn check_price(errors: &mut ValidationErrors, price: Option<f64>) -> f64 {
    match price {
        None => {
            errors.push("price", "price is required");
            0.0
        }
        Some(p) if !p.is_finite() => {
            errors.push("price", "price must be a finite number");
            0.0
        }
        Some(p) if p < 0.0 => {
            errors.push("price", format!("price ({}) is less than minimum allowed value (0)", p));
            p
        }
        Some(p) => p,
    }
}

fn check_category(errors: &mut ValidationErrors, raw: Option<&str>) -> Option<Category> {
    match Category::parse_optional(raw) {
        Ok(c) => c,
        Err(msg) => {
            errors.push("category", msg);
            None
        }
    }
}

/// A product with its owning farm resolved to a summary.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductDetail {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub category: Option<Category>,
    pub farm: Option<FarmSummary>,
}

impl ProductDetail {
    pub fn populate(product: Product, farm: Option<FarmSummary>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            category: product.category,
            farm,
        }
    }
}
