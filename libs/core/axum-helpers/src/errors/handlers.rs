use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};

use super::AppError;

/// Handler for unmatched routes.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found(uri: Uri) -> Response {
    AppError::NotFound(format!("route {}", uri.path())).into_response()
}
