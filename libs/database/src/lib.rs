//! PostgreSQL access shared by the domain crates.
//!
//! - [`postgres`]: configuration, pooled connection with retry, migrations, health
//! - [`repository`]: [`BaseRepository`] with soft-delete aware reads and writes
//! - [`common`]: retry helpers and the crate error type
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "hub_api").await?;
//! ```

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};
pub use repository::{BaseRepository, SoftDelete};
