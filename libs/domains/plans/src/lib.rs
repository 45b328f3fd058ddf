//! Plans Domain
//!
//! Subscription plans with a price in minor currency units and a duration in days.
//!
//! ```rust,no_run
//! use domain_plans::{handlers, InMemoryPlanRepository, PlanService};
//!
//! let service = PlanService::new(InMemoryPlanRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod converter;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{PlanError, PlanResult};
pub use models::{CreatePlan, Plan, PlanResponse, PlanSortField, UpdatePlan};
pub use postgres::PgPlanRepository;
pub use repository::{InMemoryPlanRepository, PlanRepository};
pub use service::PlanService;
