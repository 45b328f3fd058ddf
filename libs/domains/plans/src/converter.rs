use chrono::Utc;
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

use crate::entity;
use crate::models::{CreatePlan, Plan, PlanResponse, PlanSortField};

impl From<CreatePlan> for Plan {
    fn from(input: CreatePlan) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price_cents: input.price_cents,
            currency: input.currency,
            duration_days: input.duration_days,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            description: plan.description,
            price_cents: plan.price_cents,
            currency: plan.currency,
            duration_days: plan.duration_days,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        }
    }
}

impl From<entity::Model> for Plan {
    fn from(model: entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price_cents: model.price_cents,
            currency: model.currency,
            duration_days: model.duration_days,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Plan> for entity::ActiveModel {
    fn from(plan: Plan) -> Self {
        entity::ActiveModel {
            id: Set(plan.id),
            name: Set(plan.name),
            description: Set(plan.description),
            price_cents: Set(plan.price_cents),
            currency: Set(plan.currency),
            duration_days: Set(plan.duration_days),
            deleted: Set(false),
            created_at: Set(plan.created_at.into()),
            updated_at: Set(plan.updated_at.into()),
        }
    }
}

impl From<PlanSortField> for entity::Column {
    fn from(field: PlanSortField) -> Self {
        match field {
            PlanSortField::Id => entity::Column::Id,
            PlanSortField::Name => entity::Column::Name,
            PlanSortField::PriceCents => entity::Column::PriceCents,
            PlanSortField::DurationDays => entity::Column::DurationDays,
            PlanSortField::CreatedAt => entity::Column::CreatedAt,
            PlanSortField::UpdatedAt => entity::Column::UpdatedAt,
        }
    }
}
