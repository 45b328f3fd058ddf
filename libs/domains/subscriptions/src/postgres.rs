use async_trait::async_trait;
use axum_helpers::{Page, PageQuery};
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, QueryFilter, SqlErr};
use uuid::Uuid;

use crate::{
    entity,
    error::{SubscriptionError, SubscriptionResult},
    models::{Subscription, SubscriptionSortField},
    repository::SubscriptionRepository,
};

#[derive(Clone)]
pub struct PgSubscriptionRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// `idx_subscriptions_user_live` rejects a second live row for the same user.
fn map_write_error(err: DbErr, user_id: Uuid) -> SubscriptionError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => SubscriptionError::AlreadySubscribed(user_id),
        _ => SubscriptionError::Database(err),
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn create(&self, subscription: Subscription) -> SubscriptionResult<Subscription> {
        let user_id = subscription.user_id;
        let model = self
            .base
            .insert(entity::ActiveModel::from(subscription))
            .await
            .map_err(|e| map_write_error(e, user_id))?;

        tracing::info!(
            subscription_id = %model.id,
            user_id = %user_id,
            "Created subscription"
        );
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> SubscriptionResult<Option<Subscription>> {
        Ok(self.base.find_live_by_id(id).await?.map(Into::into))
    }

    async fn find_live_by_user(&self, user_id: Uuid) -> SubscriptionResult<Option<Subscription>> {
        let model = self
            .base
            .live()
            .filter(entity::Column::UserId.eq(user_id))
            .one(self.base.db())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_page(
        &self,
        query: PageQuery<SubscriptionSortField>,
    ) -> SubscriptionResult<Page<Subscription>> {
        let (models, total) = self
            .base
            .fetch_page(
                self.base.live(),
                query.field.into(),
                query.direction.into(),
                query.page,
                query.size,
            )
            .await?;

        let subscriptions = models.into_iter().map(Into::into).collect();
        Ok(Page::new(subscriptions, query.page, query.size, total))
    }

    async fn update(&self, subscription: Subscription) -> SubscriptionResult<Subscription> {
        let id = subscription.id;
        let user_id = subscription.user_id;
        let model = self
            .base
            .update_live(id, entity::ActiveModel::from(subscription))
            .await
            .map_err(|e| map_write_error(e, user_id))?
            .ok_or(SubscriptionError::NotFound(id))?;

        tracing::info!(subscription_id = %id, "Updated subscription");
        Ok(model.into())
    }

    async fn soft_delete(&self, id: Uuid) -> SubscriptionResult<bool> {
        let deleted = self.base.soft_delete(id).await?;
        if deleted {
            tracing::info!(subscription_id = %id, "Soft-deleted subscription");
        }
        Ok(deleted)
    }
}
