use async_trait::async_trait;
use axum_helpers::{Page, PageQuery, SortDirection};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{PlanError, PlanResult};
use crate::models::{Plan, PlanSortField};

/// Repository trait for Plan persistence; reads never return soft-deleted plans.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create(&self, plan: Plan) -> PlanResult<Plan>;

    async fn find_by_id(&self, id: Uuid) -> PlanResult<Option<Plan>>;

    async fn find_page(&self, query: PageQuery<PlanSortField>) -> PlanResult<Page<Plan>>;

    async fn update(&self, plan: Plan) -> PlanResult<Plan>;

    async fn soft_delete(&self, id: Uuid) -> PlanResult<bool>;
}

#[derive(Debug, Clone)]
struct StoredPlan {
    plan: Plan,
    deleted: bool,
}

/// In-memory implementation of PlanRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryPlanRepository {
    plans: Arc<RwLock<HashMap<Uuid, StoredPlan>>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Plan, b: &Plan, field: PlanSortField) -> Ordering {
    let primary = match field {
        PlanSortField::Id => Ordering::Equal,
        PlanSortField::Name => a.name.cmp(&b.name),
        PlanSortField::PriceCents => a.price_cents.cmp(&b.price_cents),
        PlanSortField::DurationDays => a.duration_days.cmp(&b.duration_days),
        PlanSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        PlanSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn create(&self, plan: Plan) -> PlanResult<Plan> {
        let mut plans = self.plans.write().await;
        plans.insert(
            plan.id,
            StoredPlan {
                plan: plan.clone(),
                deleted: false,
            },
        );

        tracing::info!(plan_id = %plan.id, "Created plan");
        Ok(plan)
    }

    async fn find_by_id(&self, id: Uuid) -> PlanResult<Option<Plan>> {
        let plans = self.plans.read().await;
        Ok(plans
            .get(&id)
            .filter(|s| !s.deleted)
            .map(|s| s.plan.clone()))
    }

    async fn find_page(&self, query: PageQuery<PlanSortField>) -> PlanResult<Page<Plan>> {
        let plans = self.plans.read().await;

        let mut live: Vec<Plan> = plans
            .values()
            .filter(|s| !s.deleted)
            .map(|s| s.plan.clone())
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

    async fn update(&self, plan: Plan) -> PlanResult<Plan> {
        let mut plans = self.plans.write().await;

        match plans.get_mut(&plan.id) {
            Some(stored) if !stored.deleted => {
                stored.plan = plan.clone();
                tracing::info!(plan_id = %plan.id, "Updated plan");
                Ok(plan)
            }
            _ => Err(PlanError::NotFound(plan.id)),
        }
    }

    async fn soft_delete(&self, id: Uuid) -> PlanResult<bool> {
        let mut plans = self.plans.write().await;

        match plans.get_mut(&id) {
            Some(stored) if !stored.deleted => {
                stored.deleted = true;
                stored.plan.updated_at = chrono::Utc::now();
                tracing::info!(plan_id = %id, "Soft-deleted plan");
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreatePlan;

    fn plan(name: &str, price_cents: i64) -> Plan {
        Plan::from(CreatePlan {
            name: name.to_string(),
            description: String::new(),
            price_cents,
            currency: "USD".to_string(),
            duration_days: 30,
        })
    }

    #[tokio::test]
    async fn test_find_page_by_price_desc_skips_deleted() {
        let repo = InMemoryPlanRepository::new();
        let cheap = repo.create(plan("Basic", 500)).await.unwrap();
        let pricey = repo.create(plan("Pro", 2500)).await.unwrap();
        let retired = repo.create(plan("Legacy", 9900)).await.unwrap();
        assert!(repo.soft_delete(retired.id).await.unwrap());

        let page = repo
            .find_page(PageQuery {
                field: PlanSortField::PriceCents,
                direction: SortDirection::Desc,
                ..PageQuery::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total_elements, 2);
        assert_eq!(page.content, vec![pricey, cheap]);
    }

    #[tokio::test]
    async fn test_update_deleted_plan_is_not_found() {
        let repo = InMemoryPlanRepository::new();
        let created = repo.create(plan("Basic", 500)).await.unwrap();
        repo.soft_delete(created.id).await.unwrap();

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.update(created).await,
            Err(PlanError::NotFound(_))
        ));
    }
}
