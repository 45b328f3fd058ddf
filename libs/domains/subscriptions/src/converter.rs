use chrono::Utc;
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

use crate::entity;
use crate::models::{CreateSubscription, Subscription, SubscriptionResponse, SubscriptionSortField};

impl From<CreateSubscription> for Subscription {
    fn from(input: CreateSubscription) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id: input.user_id,
            plan_id: input.plan_id,
            start_at: input.start_at,
            end_at: input.end_at,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id,
            user_id: subscription.user_id,
            plan_id: subscription.plan_id,
            start_at: subscription.start_at,
            end_at: subscription.end_at,
            created_at: subscription.created_at,
            updated_at: subscription.updated_at,
        }
    }
}

impl From<entity::Model> for Subscription {
    fn from(model: entity::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            plan_id: model.plan_id,
            start_at: model.start_at.into(),
            end_at: model.end_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Subscription> for entity::ActiveModel {
    fn from(subscription: Subscription) -> Self {
        entity::ActiveModel {
            id: Set(subscription.id),
            user_id: Set(subscription.user_id),
            plan_id: Set(subscription.plan_id),
            start_at: Set(subscription.start_at.into()),
            end_at: Set(subscription.end_at.map(Into::into)),
            deleted: Set(false),
            created_at: Set(subscription.created_at.into()),
            updated_at: Set(subscription.updated_at.into()),
        }
    }
}

impl From<SubscriptionSortField> for entity::Column {
    fn from(field: SubscriptionSortField) -> Self {
        match field {
            SubscriptionSortField::Id => entity::Column::Id,
            SubscriptionSortField::StartAt => entity::Column::StartAt,
            SubscriptionSortField::EndAt => entity::Column::EndAt,
            SubscriptionSortField::CreatedAt => entity::Column::CreatedAt,
            SubscriptionSortField::UpdatedAt => entity::Column::UpdatedAt,
        }
    }
}
