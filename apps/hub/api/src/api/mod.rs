use axum::Router;
use axum::routing::get;

use crate::state::AppState;

pub mod health;
pub mod plans;
pub mod subscriptions;
pub mod users;

/// Resource routes, each with its service state already applied.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .nest("/plans", plans::router(state))
        .nest("/subscriptions", subscriptions::router(state))
}

/// `/ready` pings the database; merged with the stateless app router.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
