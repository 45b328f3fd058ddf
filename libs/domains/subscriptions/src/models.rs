use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn window_error() -> ValidationError {
    ValidationError::new("window").with_message(Cow::Borrowed("end_at must be after start_at"))
}

/// `end_at`, when present, must be strictly after `start_at`.
fn check_window(
    start_at: DateTime<Utc>,
    end_at: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match end_at {
        Some(end_at) if end_at <= start_at => Err(window_error()),
        _ => Ok(()),
    }
}

impl Subscription {
    /// Applies the present fields of `input` and bumps `updated_at`.
    pub fn apply_update(&mut self, input: UpdateSubscription) {
        if let Some(plan_id) = input.plan_id {
            self.plan_id = plan_id;
        }
        if let Some(start_at) = input.start_at {
            self.start_at = start_at;
        }
        if let Some(end_at) = input.end_at {
            self.end_at = end_at;
        }
        self.updated_at = Utc::now();
    }

    pub fn validate_window(&self) -> Result<(), ValidationErrors> {
        check_window(self.start_at, self.end_at).map_err(|error| {
            let mut errors = ValidationErrors::new();
            errors.add("end_at", error);
            errors
        })
    }
}

fn validate_create_window(input: &CreateSubscription) -> Result<(), ValidationError> {
    check_window(input.start_at, input.end_at)
}

fn validate_update_window(input: &UpdateSubscription) -> Result<(), ValidationError> {
    match input.start_at {
        Some(start_at) => check_window(start_at, input.end_at.flatten()),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_create_window"))]
pub struct CreateSubscription {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub start_at: DateTime<Utc>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
}

/// Partial update. The owner cannot change; the window is re-checked
/// against the stored values after the update is applied.
/// `"end_at": null` makes the subscription open ended.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_update_window"))]
pub struct UpdateSubscription {
    pub plan_id: Option<Uuid>,
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "axum_helpers::nullable::deserialize")]
    pub end_at: Option<Option<DateTime<Utc>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SubscriptionSortField {
    #[default]
    Id,
    StartAt,
    EndAt,
    CreatedAt,
    UpdatedAt,
}
