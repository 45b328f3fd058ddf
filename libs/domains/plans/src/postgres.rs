use async_trait::async_trait;
use axum_helpers::{Page, PageQuery};
use database::BaseRepository;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    entity,
    error::{PlanError, PlanResult},
    models::{Plan, PlanSortField},
    repository::PlanRepository,
};

#[derive(Clone)]
pub struct PgPlanRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgPlanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn create(&self, plan: Plan) -> PlanResult<Plan> {
        let model = self.base.insert(entity::ActiveModel::from(plan)).await?;

        tracing::info!(plan_id = %model.id, "Created plan");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> PlanResult<Option<Plan>> {
        Ok(self.base.find_live_by_id(id).await?.map(Into::into))
    }

    async fn find_page(&self, query: PageQuery<PlanSortField>) -> PlanResult<Page<Plan>> {
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

        let plans = models.into_iter().map(Into::into).collect();
        Ok(Page::new(plans, query.page, query.size, total))
    }

    async fn update(&self, plan: Plan) -> PlanResult<Plan> {
        let id = plan.id;
        let model = self
            .base
            .update_live(id, entity::ActiveModel::from(plan))
            .await?
            .ok_or(PlanError::NotFound(id))?;

        tracing::info!(plan_id = %id, "Updated plan");
        Ok(model.into())
    }

    async fn soft_delete(&self, id: Uuid) -> PlanResult<bool> {
        let deleted = self.base.soft_delete(id).await?;
        if deleted {
            tracing::info!(plan_id = %id, "Soft-deleted plan");
        }
        Ok(deleted)
    }
}
