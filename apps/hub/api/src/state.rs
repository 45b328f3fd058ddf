//! Shared application state.

/// Cloned into each router; clones share the connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: database::postgres::DatabaseConnection,
}
