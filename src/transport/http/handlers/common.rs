use crate::domain::{NewProduct, ProductUpdate, ValidationErrors};
use crate::error::CatalogError;
use crate::transport::http::types::{ApiResponse, ProductForm};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Wraps `data` in a successful envelope.
pub fn respond<T: Serialize>(status: StatusCode, data: &T) -> Response {
    match serde_json::to_value(data) {
        Ok(v) => (status, Json(ApiResponse::ok(v))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure(format!("Failed to encode response: {}", e), None)),
        )
            .into_response(),
    }
}

pub fn parse_id(raw: &str) -> Result<Uuid, CatalogError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CatalogError::InvalidId(raw.to_string()))
}

/// Coerces a submitted price: JSON numbers pass through, numeric strings are parsed.
/// `null` and blank strings count as "not provided".
pub fn coerce_price(v: &JsonValue) -> Result<Option<f64>, String> {
    match v {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("price {} is not representable", n)),
        JsonValue::String(s) if s.trim().is_empty() => Ok(None),
        JsonValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("Cast to Number failed for value \"{}\"", s)),
        other => Err(format!("Cast to Number failed for value {}", other)),
    }
}

fn form_price(form_price: Option<&JsonValue>) -> Result<Option<f64>, CatalogError> {
    match form_price {
        None => Ok(None),
        Some(v) => coerce_price(v).map_err(|msg| ValidationErrors::single("price", msg).into()),
    }
}

impl ProductForm {
    pub fn into_new_product(self) -> Result<NewProduct, CatalogError> {
        Ok(NewProduct {
            price: form_price(self.price.as_ref())?,
            name: self.name.unwrap_or_default(),
            category: self.category,
        })
    }

    pub fn into_update(self) -> Result<ProductUpdate, CatalogError> {
        Ok(ProductUpdate {
            price: form_price(self.price.as_ref())?,
            name: self.name,
            category: self.category,
        })
    }
}
