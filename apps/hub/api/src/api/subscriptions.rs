use axum::Router;
use domain_plans::PgPlanRepository;
use domain_subscriptions::{PgSubscriptionRepository, SubscriptionService, handlers};
use domain_users::PgUserRepository;
use std::sync::Arc;

use crate::state::AppState;

/// Subscriptions read users and plans through their Postgres repositories
/// to reject references to missing or soft-deleted rows.
pub fn router(state: &AppState) -> Router {
    let service = SubscriptionService::new(
        PgSubscriptionRepository::new(state.db.clone()),
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(PgPlanRepository::new(state.db.clone())),
    );
    handlers::router(service)
}
