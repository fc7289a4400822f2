//! Error taxonomy shared by the store backends, the catalog service and the HTTP layer.

use crate::domain::ValidationErrors;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Farm,
    Product,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Farm => f.write_str("Farm"),
            RecordKind::Product => f.write_str("Product"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} not found")]
    NotFound { kind: RecordKind, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl CatalogError {
    pub fn farm_not_found(id: Uuid) -> Self {
        CatalogError::NotFound {
            kind: RecordKind::Farm,
            id,
        }
    }

    pub fn product_not_found(id: Uuid) -> Self {
        CatalogError::NotFound {
            kind: RecordKind::Product,
            id,
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        // SQLSTATE class 23: integrity constraint violation (NOT NULL, CHECK, ...).
        if let sqlx::Error::Database(db) = &err {
            if db.code().map_or(false, |code| code.starts_with("23")) {
                let field = db.constraint().unwrap_or("record").to_string();
                return CatalogError::Validation(ValidationErrors::single(&field, db.message()));
            }
        }
        CatalogError::Store(err.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
