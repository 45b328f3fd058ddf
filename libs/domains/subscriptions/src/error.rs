use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, PageError};
use domain_plans::PlanError;
use domain_users::UserError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Subscription not found: {0}")]
    NotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Plan not found: {0}")]
    PlanNotFound(Uuid),

    #[error("User {0} already has a live subscription")]
    AlreadySubscribed(Uuid),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type SubscriptionResult<T> = Result<T, SubscriptionError>;

impl From<SubscriptionError> for AppError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::NotFound(id) => {
                AppError::NotFound(format!("Subscription {} not found", id))
            }
            SubscriptionError::UserNotFound(id) => {
                AppError::NotFound(format!("User {} not found", id))
            }
            SubscriptionError::PlanNotFound(id) => {
                AppError::NotFound(format!("Plan {} not found", id))
            }
            SubscriptionError::AlreadySubscribed(user_id) => AppError::Conflict(format!(
                "User {} already has a live subscription",
                user_id
            )),
            SubscriptionError::Validation(errors) => AppError::ValidationError(errors),
            SubscriptionError::Page(err) => err.into(),
            SubscriptionError::User(err) => err.into(),
            SubscriptionError::Plan(err) => err.into(),
            SubscriptionError::Database(err) => AppError::Database(err),
        }
    }
}

impl IntoResponse for SubscriptionError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
