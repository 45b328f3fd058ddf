use axum_helpers::{Page, PageQuery};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{PlanError, PlanResult};
use crate::models::{CreatePlan, Plan, PlanSortField, UpdatePlan};
use crate::repository::PlanRepository;

#[derive(Clone)]
pub struct PlanService<R: PlanRepository> {
    repository: Arc<R>,
}

impl<R: PlanRepository> PlanService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_plan(&self, input: CreatePlan) -> PlanResult<Plan> {
        input.validate()?;
        self.repository.create(Plan::from(input)).await
    }

    pub async fn get_plan(&self, id: Uuid) -> PlanResult<Plan> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PlanError::NotFound(id))
    }

    pub async fn list_plans(&self, query: PageQuery<PlanSortField>) -> PlanResult<Page<Plan>> {
        self.repository.find_page(query).await
    }

    pub async fn update_plan(&self, id: Uuid, input: UpdatePlan) -> PlanResult<Plan> {
        input.validate()?;

        let mut plan = self.get_plan(id).await?;
        plan.apply_update(input);
        self.repository.update(plan).await
    }

    pub async fn delete_plan(&self, id: Uuid) -> PlanResult<()> {
        if !self.repository.soft_delete(id).await? {
            return Err(PlanError::NotFound(id));
        }
        Ok(())
    }
}
