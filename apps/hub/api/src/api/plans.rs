use axum::Router;
use domain_plans::{PgPlanRepository, PlanService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = PlanService::new(PgPlanRepository::new(state.db.clone()));
    handlers::router(service)
}
