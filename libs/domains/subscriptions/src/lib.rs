//! Subscriptions Domain
//!
//! Links a live user to a live plan for a time window. A user holds at most
//! one live subscription; `end_at`, when present, must be after `start_at`.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_plans::InMemoryPlanRepository;
//! use domain_subscriptions::{handlers, InMemorySubscriptionRepository, SubscriptionService};
//! use domain_users::InMemoryUserRepository;
//!
//! let service = SubscriptionService::new(
//!     InMemorySubscriptionRepository::new(),
//!     Arc::new(InMemoryUserRepository::new()),
//!     Arc::new(InMemoryPlanRepository::new()),
//! );
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

pub use error::{SubscriptionError, SubscriptionResult};
pub use models::{
    CreateSubscription, Subscription, SubscriptionResponse, SubscriptionSortField,
    UpdateSubscription,
};
pub use postgres::PgSubscriptionRepository;
pub use repository::{InMemorySubscriptionRepository, SubscriptionRepository};
pub use service::SubscriptionService;
