//! Users Domain
//!
//! User accounts with soft deletion. Email addresses are unique among live users.
//!
//! ```text
//! handlers ─► service ─► repository (in-memory | postgres)
//!     │                        │
//!     └──── converter ◄────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
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

pub use error::{UserError, UserResult};
pub use models::{CreateUser, UpdateUser, User, UserResponse, UserSortField};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
