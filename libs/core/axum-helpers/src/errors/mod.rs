pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Standard error response structure.
///
/// Returned for every error:
/// - `status`: HTTP status code
/// - `code`: Integer error code for logging/monitoring (e.g., 1004)
/// - `error`: Machine-readable error identifier (e.g., "NOT_FOUND")
/// - `message`: Human-readable message, localized per `Accept-Language`
/// - `details`: Field errors or a reason, `null` when there is nothing to add
///
/// ```json
/// {
///   "status": 404,
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Resource not found",
///   "details": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub code: i32,
    pub error: String,
    pub message: String,
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            status: code.status().as_u16(),
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details,
        }
    }
}

/// Attached to every error response so an outer layer can re-render the
/// message for the request locale.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub code: ErrorCode,
    pub details: Option<Value>,
}

impl ErrorContext {
    pub fn render(&self, message: impl Into<String>) -> Response {
        let body = ErrorResponse::new(self.code, message, self.details.clone());
        let mut response = (self.code.status(), Json(body)).into_response();
        response.extensions_mut().insert(self.clone());
        response
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ValidationError(_) => ErrorCode::ValidationError,
            Self::JsonExtractorRejection(_) => ErrorCode::InvalidJson,
            Self::QueryExtractorRejection(_) => ErrorCode::InvalidQuery,
            Self::InvalidUuid(_) => ErrorCode::InvalidUuid,
            Self::BadRequest(_) => ErrorCode::BadRequest,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Conflict(_) => ErrorCode::Conflict,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::InternalServerError(_) => ErrorCode::InternalError,
            Self::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        let details = match self {
            AppError::ValidationError(e) => {
                tracing::info!(error_code = code.code(), "Validation error: {}", e);
                Some(validation_details(&e))
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = code.code(), "JSON extraction error: {:?}", e);
                Some(json!(e.body_text()))
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::warn!(error_code = code.code(), "Query extraction error: {:?}", e);
                Some(json!(e.body_text()))
            }
            AppError::InvalidUuid(raw) => {
                tracing::warn!(error_code = code.code(), "Invalid UUID: {}", raw);
                Some(json!(format!("'{raw}' is not a valid UUID")))
            }
            AppError::BadRequest(reason) => {
                tracing::info!(error_code = code.code(), "Bad request: {}", reason);
                Some(json!(reason))
            }
            AppError::NotFound(what) => {
                tracing::info!(error_code = code.code(), "Not found: {}", what);
                None
            }
            AppError::Conflict(reason) => {
                tracing::info!(error_code = code.code(), "Conflict: {}", reason);
                Some(json!(reason))
            }
            AppError::Database(e) => {
                tracing::error!(error_code = code.code(), "Database error: {:?}", e);
                None
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                None
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = code.code(), "Service unavailable: {}", msg);
                None
            }
        };

        ErrorContext { code, details }.render(code.default_message())
    }
}

/// Flattens validator output into `{ field: [{ code, message, params }] }`.
///
/// Struct-level (schema) errors appear under `__all__`; nested structs are
/// flattened with dotted field names.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let mut fields = serde_json::Map::new();
    collect_field_errors(errors, None, &mut fields);
    Value::Object(fields)
}

fn collect_field_errors(
    errors: &ValidationErrors,
    prefix: Option<&str>,
    out: &mut serde_json::Map<String, Value>,
) {
    for (field, kind) in errors.errors() {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                let entries = errs
                    .iter()
                    .map(|err| {
                        json!({
                            "code": err.code,
                            "message": err.message,
                            "params": err.params,
                        })
                    })
                    .collect();
                out.insert(name, Value::Array(entries));
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(nested, Some(&name), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(nested, Some(&format!("{name}[{index}]")), out);
                }
            }
        }
    }
}
