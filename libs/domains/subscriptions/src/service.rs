use axum_helpers::{Page, PageQuery};
use domain_plans::PlanRepository;
use domain_users::UserRepository;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{SubscriptionError, SubscriptionResult};
use crate::models::{CreateSubscription, Subscription, SubscriptionSortField, UpdateSubscription};
use crate::repository::SubscriptionRepository;

/// Subscription use cases. Reads users and plans through their own
/// repositories to check that references are live.
#[derive(Clone)]
pub struct SubscriptionService<R: SubscriptionRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl<R: SubscriptionRepository> SubscriptionService<R> {
    pub fn new(
        repository: R,
        users: Arc<dyn UserRepository>,
        plans: Arc<dyn PlanRepository>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            plans,
        }
    }

    async fn ensure_user_live(&self, user_id: Uuid) -> SubscriptionResult<()> {
        match self.users.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(SubscriptionError::UserNotFound(user_id)),
        }
    }

    async fn ensure_plan_live(&self, plan_id: Uuid) -> SubscriptionResult<()> {
        match self.plans.find_by_id(plan_id).await? {
            Some(_) => Ok(()),
            None => Err(SubscriptionError::PlanNotFound(plan_id)),
        }
    }

    pub async fn create_subscription(
        &self,
        input: CreateSubscription,
    ) -> SubscriptionResult<Subscription> {
        input.validate()?;

        self.ensure_user_live(input.user_id).await?;
        self.ensure_plan_live(input.plan_id).await?;

        if self
            .repository
            .find_live_by_user(input.user_id)
            .await?
            .is_some()
        {
            return Err(SubscriptionError::AlreadySubscribed(input.user_id));
        }

        self.repository.create(Subscription::from(input)).await
    }

    pub async fn get_subscription(&self, id: Uuid) -> SubscriptionResult<Subscription> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(SubscriptionError::NotFound(id))
    }

    pub async fn list_subscriptions(
        &self,
        query: PageQuery<SubscriptionSortField>,
    ) -> SubscriptionResult<Page<Subscription>> {
        self.repository.find_page(query).await
    }

    pub async fn update_subscription(
        &self,
        id: Uuid,
        input: UpdateSubscription,
    ) -> SubscriptionResult<Subscription> {
        input.validate()?;

        let mut subscription = self.get_subscription(id).await?;

        if let Some(plan_id) = input.plan_id
            && plan_id != subscription.plan_id
        {
            self.ensure_plan_live(plan_id).await?;
        }

        subscription.apply_update(input);
        subscription.validate_window()?;
        self.repository.update(subscription).await
    }

    pub async fn delete_subscription(&self, id: Uuid) -> SubscriptionResult<()> {
        if !self.repository.soft_delete(id).await? {
            return Err(SubscriptionError::NotFound(id));
        }
        Ok(())
    }
}
