//! The fixed product category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fruit,
    Vegetable,
    Dairy,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 3] = [Category::Fruit, Category::Vegetable, Category::Dairy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fruit => "fruit",
            Category::Vegetable => "vegetable",
            Category::Dairy => "dairy",
        }
    }

    /// Parses an optional raw category as it arrives from a client.
    ///
    /// Input is trimmed and lowercased before matching; blank input means "no category".
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Category>, String> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "`{}` is not a valid category (expected one of: {})",
                    s,
                    Category::ALL.map(|c| c.as_str()).join(", ")
                )
            })
    }
}
