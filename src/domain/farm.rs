//! Farm records.

use crate::domain::product::Product;
use crate::domain::validation::{require_text, ValidationErrors};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A farm and the ids of the products listed under it.
///
/// `products` tracks membership only. Product records live in their own store and may
/// outlive a stale entry here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Farm {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    pub email: String,
    #[serde(default)]
    pub products: Vec<Uuid>,
}

/// Fields accepted when creating a farm.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewFarm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub email: String,
}

impl NewFarm {
    /// Validates the fields and builds a farm with an empty product list.
    pub fn into_farm(self, id: Uuid) -> Result<Farm, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = require_text(&mut errors, "name", &self.name, "Farm must have a name!");
        let email = require_text(&mut errors, "email", &self.email, "Email required!");

        let city = self
            .city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        errors.finish(Farm {
            id,
            name,
            city,
            email,
            products: Vec::new(),
        })
    }
}

/// The `{id, name}` view of a farm shown next to its products.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FarmSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<&Farm> for FarmSummary {
    fn from(farm: &Farm) -> Self {
        Self {
            id: farm.id,
            name: farm.name.clone(),
        }
    }
}

/// A farm with its product list resolved to full records.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FarmDetail {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub email: String,
    pub products: Vec<Product>,
}

impl FarmDetail {
    /// Orders `resolved` by the farm's list. Ids that did not resolve are skipped.
    pub fn populate(farm: Farm, resolved: Vec<Product>) -> Self {
        let products = farm
            .products
            .iter()
            .filter_map(|id| resolved.iter().find(|p| p.id == *id).cloned())
            .collect();
        Self {
            id: farm.id,
            name: farm.name,
            city: farm.city,
            email: farm.email,
            products,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_and_email_are_both_reported() {
        let err = NewFarm::default().into_farm(Uuid::new_v4()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "name: Farm must have a name!, email: Email required!"
        );
    }

    #[test]
    fn text_fields_are_stored_trimmed() {
        let farm = NewFarm {
            name: "  Full Belly Farms ".into(),
            city: Some(" Guinda ".into()),
            email: " hello@fullbelly.test\n".into(),
        }
        .into_farm(Uuid::new_v4())
        .unwrap();
        assert_eq!(farm.name, "Full Belly Farms");
        assert_eq!(farm.city.as_deref(), Some("Guinda"));
        assert_eq!(farm.email, "hello@fullbelly.test");
    }

    #[test]
    fn whitespace_only_name_is_rejected() {
        let err = NewFarm {
            name: "   ".into(),
            city: None,
            email: "a@b.test".into(),
        }
        .into_farm(Uuid::new_v4())
        .unwrap_err();
        assert!(err.has_field("name"));
        assert!(!err.has_field("email"));
    }

    #[test]
    fn blank_city_is_dropped() {
        let farm = NewFarm {
            name: "Full Belly Farms".into(),
            city: Some("  ".into()),
            email: "hello@fullbelly.test".into(),
        }
        .into_farm(Uuid::new_v4())
        .unwrap();
        assert_eq!(farm.city, None);
        assert!(farm.products.is_empty());
    }
}
