//! Conversions between request payloads, the domain [`User`], rows and responses.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

use crate::entity;
use crate::models::{CreateUser, User, UserResponse, UserSortField, normalize_email};

impl From<CreateUser> for User {
    fn from(input: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email: normalize_email(&input.email),
            name: input.name,
            phone: input.phone,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<entity::Model> for User {
    fn from(model: entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Live row for `user`; every column is set so the same value serves insert and update.
impl From<User> for entity::ActiveModel {
    fn from(user: User) -> Self {
        entity::ActiveModel {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            phone: Set(user.phone),
            deleted: Set(false),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}

impl From<UserSortField> for entity::Column {
    fn from(field: UserSortField) -> Self {
        match field {
            UserSortField::Id => entity::Column::Id,
            UserSortField::Name => entity::Column::Name,
            UserSortField::Email => entity::Column::Email,
            UserSortField::CreatedAt => entity::Column::CreatedAt,
            UserSortField::UpdatedAt => entity::Column::UpdatedAt,
        }
    }
}
