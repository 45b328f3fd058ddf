use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{Page, PageRequest, UuidPath, ValidatedJson, ValidatedQuery};
use std::sync::Arc;

use crate::error::SubscriptionResult;
use crate::models::{
    CreateSubscription, SubscriptionResponse, SubscriptionSortField, UpdateSubscription,
};
use crate::repository::SubscriptionRepository;
use crate::service::SubscriptionService;

pub fn router<R: SubscriptionRepository + 'static>(service: SubscriptionService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_subscriptions).post(create_subscription))
        .route(
            "/{id}",
            get(get_subscription)
                .put(update_subscription)
                .delete(delete_subscription),
        )
        .with_state(shared_service)
}

async fn list_subscriptions<R: SubscriptionRepository>(
    State(service): State<Arc<SubscriptionService<R>>>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> SubscriptionResult<Json<Page<SubscriptionResponse>>> {
    let query = page.resolve::<SubscriptionSortField>()?;
    let subscriptions = service.list_subscriptions(query).await?;
    Ok(Json(subscriptions.map(SubscriptionResponse::from)))
}

async fn create_subscription<R: SubscriptionRepository>(
    State(service): State<Arc<SubscriptionService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateSubscription>,
) -> SubscriptionResult<impl IntoResponse> {
    let subscription = service.create_subscription(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::from(subscription)),
    ))
}

async fn get_subscription<R: SubscriptionRepository>(
    State(service): State<Arc<SubscriptionService<R>>>,
    UuidPath(id): UuidPath,
) -> SubscriptionResult<Json<SubscriptionResponse>> {
    Ok(Json(service.get_subscription(id).await?.into()))
}

async fn update_subscription<R: SubscriptionRepository>(
    State(service): State<Arc<SubscriptionService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateSubscription>,
) -> SubscriptionResult<Json<SubscriptionResponse>> {
    Ok(Json(service.update_subscription(id, input).await?.into()))
}

async fn delete_subscription<R: SubscriptionRepository>(
    State(service): State<Arc<SubscriptionService<R>>>,
    UuidPath(id): UuidPath,
) -> SubscriptionResult<impl IntoResponse> {
    service.delete_subscription(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
