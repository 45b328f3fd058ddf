//! Server infrastructure module.
//!
//! - Router assembly with the cross-cutting layers
//! - Health and readiness endpoints
//! - Graceful shutdown with a cleanup hook
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let apis = Router::new()
//!     .nest("/users", users_router)
//!     .merge(health_router(app_info!()));
//! let router = create_router(apis, i18n, &config.server);
//!
//! create_app(router, &config.server, async move { db.close().await.ok(); }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::shutdown_signal;
