use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{Page, PageRequest, UuidPath, ValidatedJson, ValidatedQuery};
use std::sync::Arc;

use crate::error::PlanResult;
use crate::models::{CreatePlan, PlanResponse, PlanSortField, UpdatePlan};
use crate::repository::PlanRepository;
use crate::service::PlanService;

pub fn router<R: PlanRepository + 'static>(service: PlanService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/{id}", get(get_plan).put(update_plan).delete(delete_plan))
        .with_state(shared_service)
}

async fn list_plans<R: PlanRepository>(
    State(service): State<Arc<PlanService<R>>>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> PlanResult<Json<Page<PlanResponse>>> {
    let query = page.resolve::<PlanSortField>()?;
    let plans = service.list_plans(query).await?;
    Ok(Json(plans.map(PlanResponse::from)))
}

async fn create_plan<R: PlanRepository>(
    State(service): State<Arc<PlanService<R>>>,
    ValidatedJson(input): ValidatedJson<CreatePlan>,
) -> PlanResult<impl IntoResponse> {
    let plan = service.create_plan(input).await?;
    Ok((StatusCode::CREATED, Json(PlanResponse::from(plan))))
}

async fn get_plan<R: PlanRepository>(
    State(service): State<Arc<PlanService<R>>>,
    UuidPath(id): UuidPath,
) -> PlanResult<Json<PlanResponse>> {
    Ok(Json(service.get_plan(id).await?.into()))
}

async fn update_plan<R: PlanRepository>(
    State(service): State<Arc<PlanService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdatePlan>,
) -> PlanResult<Json<PlanResponse>> {
    Ok(Json(service.update_plan(id, input).await?.into()))
}

async fn delete_plan<R: PlanRepository>(
    State(service): State<Arc<PlanService<R>>>,
    UuidPath(id): UuidPath,
) -> PlanResult<impl IntoResponse> {
    service.delete_plan(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
