use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, PageError};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Plan not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type PlanResult<T> = Result<T, PlanError>;

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::NotFound(id) => AppError::NotFound(format!("Plan {} not found", id)),
            PlanError::Validation(errors) => AppError::ValidationError(errors),
            PlanError::Page(err) => err.into(),
            PlanError::Database(err) => AppError::Database(err),
        }
    }
}

impl IntoResponse for PlanError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
