//! # Axum Helpers
//!
//! Shared HTTP plumbing for the hub services.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: Middleware (error localization, security headers)
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON and query)
//! - **[`pagination`]**: Page requests, sort parsing and page envelopes
//! - **[`nullable`]**: Tri-state fields for partial updates
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use core_i18n::{I18n, I18nConfig};
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let config = ServerConfig::default();
//!     let i18n = I18n::from_config(&I18nConfig::default())?;
//!     let router = create_router(Router::new(), i18n, &config);
//!
//!     create_app(router, &config, async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod nullable;
pub mod pagination;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, create_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{RequestLocale, localize_errors, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorContext, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson, ValidatedQuery};

pub use pagination::{Page, PageError, PageQuery, PageRequest, SortDirection};
