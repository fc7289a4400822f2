use crate::app::catalog_service::CatalogService;
use crate::domain::FieldViolation;
use crate::error::CatalogError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::error;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

/// Envelope for every response body.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>, data: Option<JsonValue>) -> Self {
        Self {
            success: false,
            data,
            error: Some(error.into()),
        }
    }
}

/// Product fields as submitted by a client.
///
/// `price` accepts a JSON number or a numeric string (form posts send strings).
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct ProductForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub price: Option<JsonValue>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct ProductFilter {
    /// Optional category filter, matched case-insensitively.
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct FarmDeletedResponse {
    pub deleted: bool,
    pub cascaded_products: u64,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ProductDeletedResponse {
    pub deleted: bool,
}

/// Errors a handler can return.
#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    InvalidJson {
        rejection: JsonRejection,
        expected: &'static str,
    },
}

impl ApiError {
    pub fn json(rejection: JsonRejection, expected: &'static str) -> Self {
        ApiError::InvalidJson {
            rejection,
            expected,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidJson {
                rejection,
                expected,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiResponse::failure(
                    format!("Invalid JSON body: {} (expected: {})", rejection, expected),
                    None,
                ),
            ),
            ApiError::Catalog(err) => {
                let status = match &err {
                    CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
                    CatalogError::Validation(_) | CatalogError::InvalidId(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    CatalogError::Store(_) => {
                        error!(error = %err, "store failure");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let data = match &err {
                    CatalogError::Validation(v) => Some(violations_json(v.violations())),
                    _ => None,
                };
                (status, ApiResponse::failure(err.to_string(), data))
            }
        };
        (status, Json(body)).into_response()
    }
}

fn violations_json(violations: &[FieldViolation]) -> JsonValue {
    serde_json::json!({ "errors": violations })
}
