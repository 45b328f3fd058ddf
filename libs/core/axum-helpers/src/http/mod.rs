//! HTTP middleware module.
//!
//! - Error localization driven by `Accept-Language`
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{localize_errors, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn_with_state(i18n, localize_errors))
//!     .layer(axum::middleware::from_fn(security_headers));
//! ```

pub mod localization;
pub mod security;

pub use localization::{RequestLocale, localize_errors};
pub use security::security_headers;
