//! Custom extractors for Axum handlers.
//!
//! Every rejection is an [`crate::AppError`] response, so clients get the
//! same error body (and localization) as handler errors.

pub mod uuid_path;
pub mod validated_json;
pub mod validated_query;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
