//! Readiness check backed by a real database round trip.

use crate::state::AppState;
use axum::{Json, extract::State};
use axum_helpers::AppError;
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;
use serde_json::Value;

pub async fn ready_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            check_health(&state.db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}
