use async_trait::async_trait;
use axum_helpers::{Page, PageQuery, SortDirection};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{SubscriptionError, SubscriptionResult};
use crate::models::{Subscription, SubscriptionSortField};

/// Repository trait for Subscription persistence.
///
/// Reads never return soft-deleted subscriptions. `create` fails with
/// `AlreadySubscribed` when the user already holds a live subscription.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(&self, subscription: Subscription) -> SubscriptionResult<Subscription>;

    async fn find_by_id(&self, id: Uuid) -> SubscriptionResult<Option<Subscription>>;

    async fn find_live_by_user(&self, user_id: Uuid) -> SubscriptionResult<Option<Subscription>>;

    async fn find_page(
        &self,
        query: PageQuery<SubscriptionSortField>,
    ) -> SubscriptionResult<Page<Subscription>>;

    async fn update(&self, subscription: Subscription) -> SubscriptionResult<Subscription>;

    async fn soft_delete(&self, id: Uuid) -> SubscriptionResult<bool>;
}

#[derive(Debug, Clone)]
struct StoredSubscription {
    subscription: Subscription,
    deleted: bool,
}

/// In-memory implementation of SubscriptionRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Arc<RwLock<HashMap<Uuid, StoredSubscription>>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Subscription, b: &Subscription, field: SubscriptionSortField) -> Ordering {
    let primary = match field {
        SubscriptionSortField::Id => Ordering::Equal,
        SubscriptionSortField::StartAt => a.start_at.cmp(&b.start_at),
        // open-ended subscriptions sort last, as Postgres does with NULLs
        SubscriptionSortField::EndAt => match (a.end_at, b.end_at) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SubscriptionSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SubscriptionSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn create(&self, subscription: Subscription) -> SubscriptionResult<Subscription> {
        let mut subscriptions = self.subscriptions.write().await;

        if subscriptions
            .values()
            .any(|s| !s.deleted && s.subscription.user_id == subscription.user_id)
        {
            return Err(SubscriptionError::AlreadySubscribed(subscription.user_id));
        }

        subscriptions.insert(
            subscription.id,
            StoredSubscription {
                subscription: subscription.clone(),
                deleted: false,
            },
        );

        tracing::info!(
            subscription_id = %subscription.id,
            user_id = %subscription.user_id,
            "Created subscription"
        );
        Ok(subscription)
    }

    async fn find_by_id(&self, id: Uuid) -> SubscriptionResult<Option<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions
            .get(&id)
            .filter(|s| !s.deleted)
            .map(|s| s.subscription.clone()))
    }

    async fn find_live_by_user(&self, user_id: Uuid) -> SubscriptionResult<Option<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions
            .values()
            .find(|s| !s.deleted && s.subscription.user_id == user_id)
            .map(|s| s.subscription.clone()))
    }

    async fn find_page(
        &self,
        query: PageQuery<SubscriptionSortField>,
    ) -> SubscriptionResult<Page<Subscription>> {
        let subscriptions = self.subscriptions.read().await;

        let mut live: Vec<Subscription> = subscriptions
            .values()
            .filter(|s| !s.deleted)
            .map(|s| s.subscription.clone())
            .collect();
        live.sort_by(|a, b| match query.direction {
            SortDirection::Asc => compare(a, b, query.field),
            SortDirection::Desc => compare(b, a, query.field),
        });

        let total = live.len() as u64;
        let content = live
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.size as usize)
            .collect();

        Ok(Page::new(content, query.page, query.size, total))
    }

    async fn update(&self, subscription: Subscription) -> SubscriptionResult<Subscription> {
        let mut subscriptions = self.subscriptions.write().await;

        match subscriptions.get_mut(&subscription.id) {
            Some(stored) if !stored.deleted => {
                stored.subscription = subscription.clone();
                tracing::info!(subscription_id = %subscription.id, "Updated subscription");
                Ok(subscription)
            }
            _ => Err(SubscriptionError::NotFound(subscription.id)),
        }
    }

    async fn soft_delete(&self, id: Uuid) -> SubscriptionResult<bool> {
        let mut subscriptions = self.subscriptions.write().await;

        match subscriptions.get_mut(&id) {
            Some(stored) if !stored.deleted => {
                stored.deleted = true;
                stored.subscription.updated_at = chrono::Utc::now();
                tracing::info!(subscription_id = %id, "Soft-deleted subscription");
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateSubscription;
    use chrono::{Duration, Utc};

    fn subscription(user_id: Uuid, end_in_days: Option<i64>) -> Subscription {
        let start_at = Utc::now();
        Subscription::from(CreateSubscription {
            user_id,
            plan_id: Uuid::now_v7(),
            start_at,
            end_at: end_in_days.map(|days| start_at + Duration::days(days)),
        })
    }

    #[tokio::test]
    async fn test_one_live_subscription_per_user() {
        let repo = InMemorySubscriptionRepository::new();
        let user_id = Uuid::now_v7();
        let first = repo.create(subscription(user_id, None)).await.unwrap();

        let second = repo.create(subscription(user_id, Some(30))).await;
        assert!(matches!(second, Err(SubscriptionError::AlreadySubscribed(id)) if id == user_id));

        assert!(repo.soft_delete(first.id).await.unwrap());
        assert!(repo.create(subscription(user_id, Some(30))).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_live_by_user_ignores_deleted() {
        let repo = InMemorySubscriptionRepository::new();
        let user_id = Uuid::now_v7();
        let created = repo.create(subscription(user_id, None)).await.unwrap();

        assert_eq!(
            repo.find_live_by_user(user_id).await.unwrap(),
            Some(created.clone())
        );

        repo.soft_delete(created.id).await.unwrap();
        assert!(repo.find_live_by_user(user_id).await.unwrap().is_none());
        assert!(!repo.soft_delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_sort_by_end_at_puts_open_ended_last() {
        let repo = InMemorySubscriptionRepository::new();
        let open = repo
            .create(subscription(Uuid::now_v7(), None))
            .await
            .unwrap();
        let long = repo
            .create(subscription(Uuid::now_v7(), Some(365)))
            .await
            .unwrap();
        let short = repo
            .create(subscription(Uuid::now_v7(), Some(7)))
            .await
            .unwrap();

        let page = repo
            .find_page(PageQuery {
                field: SubscriptionSortField::EndAt,
                ..PageQuery::default()
            })
            .await
            .unwrap();

        let ids: Vec<Uuid> = page.content.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![short.id, long.id, open.id]);
    }
}
