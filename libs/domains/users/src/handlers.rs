use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{Page, PageRequest, UuidPath, ValidatedJson, ValidatedQuery};
use std::sync::Arc;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, UserResponse, UserSortField};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Routes for `/users`, to be nested by the application
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_service)
}

async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> UserResult<Json<Page<UserResponse>>> {
    let query = page.resolve::<UserSortField>()?;
    let users = service.list_users(query).await?;
    Ok(Json(users.map(UserResponse::from)))
}

async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(id).await?;
    Ok(Json(user.into()))
}

async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = service.update_user(id, input).await?;
    Ok(Json(user.into()))
}

async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<impl IntoResponse> {
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
