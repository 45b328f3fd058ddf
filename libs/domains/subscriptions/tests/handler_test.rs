//! Handler tests for the Subscriptions domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{ErrorResponse, Page, create_router};
use chrono::{Duration, Utc};
use core_config::server::ServerConfig;
use core_i18n::{I18n, I18nConfig};
use domain_plans::{CreatePlan, InMemoryPlanRepository, Plan, PlanRepository};
use domain_subscriptions::*;
use domain_users::{CreateUser, InMemoryUserRepository, User, UserRepository};
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    users: InMemoryUserRepository,
    plans: InMemoryPlanRepository,
}

impl TestApp {
    fn new() -> Self {
        let users = InMemoryUserRepository::new();
        let plans = InMemoryPlanRepository::new();
        let service = SubscriptionService::new(
            InMemorySubscriptionRepository::new(),
            Arc::new(users.clone()),
            Arc::new(plans.clone()),
        );
        let i18n = I18n::from_config(&I18nConfig::default()).unwrap();
        let router = create_router(
            Router::new().nest("/subscriptions", handlers::router(service)),
            i18n,
            &ServerConfig::default(),
        );

        Self {
            router,
            users,
            plans,
        }
    }

    async fn user(&self, email: &str) -> User {
        self.users
            .create(User::from(CreateUser {
                name: "Grace".to_string(),
                email: email.to_string(),
                phone: None,
            }))
            .await
            .unwrap()
    }

    async fn plan(&self, name: &str) -> Plan {
        self.plans
            .create(Plan::from(CreatePlan {
                name: name.to_string(),
                description: String::new(),
                price_cents: 1990,
                currency: "USD".to_string(),
                duration_days: 30,
            }))
            .await
            .unwrap()
    }

    async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn subscribe(user_id: Uuid, plan_id: Uuid) -> Request<Body> {
    request(
        "POST",
        "/subscriptions",
        Some(json!({
            "user_id": user_id,
            "plan_id": plan_id,
            "start_at": Utc::now(),
        })),
    )
}

#[tokio::test]
async fn test_create_and_get_subscription() {
    let app = TestApp::new();
    let user = app.user("grace@example.com").await;
    let plan = app.plan("Pro").await;

    let response = app.send(subscribe(user.id, plan.id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: SubscriptionResponse = json_body(response.into_body()).await;
    assert_eq!(created.user_id, user.id);
    assert!(created.end_at.is_none());

    let response = app
        .send(request(
            "GET",
            &format!("/subscriptions/{}", created.id),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: SubscriptionResponse = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_second_live_subscription_is_conflict() {
    let app = TestApp::new();
    let user = app.user("grace@example.com").await;
    let basic = app.plan("Basic").await;
    let pro = app.plan("Pro").await;

    let response = app.send(subscribe(user.id, basic.id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.send(subscribe(user.id, pro.id)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "CONFLICT");
}

#[tokio::test]
async fn test_resubscribe_after_delete() {
    let app = TestApp::new();
    let user = app.user("grace@example.com").await;
    let plan = app.plan("Pro").await;

    let response = app.send(subscribe(user.id, plan.id)).await;
    let first: SubscriptionResponse = json_body(response.into_body()).await;

    let response = app
        .send(request(
            "DELETE",
            &format!("/subscriptions/{}", first.id),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.send(subscribe(user.id, plan.id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_subscription_for_deleted_user_is_not_found() {
    let app = TestApp::new();
    let user = app.user("grace@example.com").await;
    let plan = app.plan("Pro").await;
    app.users.soft_delete(user.id).await.unwrap();

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/subscriptions")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ACCEPT_LANGUAGE, "pt-BR")
                .body(Body::from(
                    json!({
                        "user_id": user.id,
                        "plan_id": plan.id,
                        "start_at": Utc::now(),
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(header::CONTENT_LANGUAGE).unwrap(),
        "pt-BR"
    );
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "NOT_FOUND");
}

#[tokio::test]
async fn test_create_with_end_before_start_is_validation_error() {
    let app = TestApp::new();
    let user = app.user("grace@example.com").await;
    let plan = app.plan("Pro").await;
    let start_at = Utc::now();

    let response = app
        .send(request(
            "POST",
            "/subscriptions",
            Some(json!({
                "user_id": user.id,
                "plan_id": plan.id,
                "start_at": start_at,
                "end_at": start_at - Duration::days(1),
            })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.code, 1001);
}

#[tokio::test]
async fn test_update_end_before_stored_start_is_validation_error() {
    let app = TestApp::new();
    let user = app.user("grace@example.com").await;
    let plan = app.plan("Pro").await;

    let response = app.send(subscribe(user.id, plan.id)).await;
    let created: SubscriptionResponse = json_body(response.into_body()).await;

    let response = app
        .send(request(
            "PUT",
            &format!("/subscriptions/{}", created.id),
            Some(json!({ "end_at": created.start_at - Duration::days(1) })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "VALIDATION_ERROR");
    assert!(body.details.unwrap().get("end_at").is_some());
}

#[tokio::test]
async fn test_update_null_end_makes_subscription_open_ended() {
    let app = TestApp::new();
    let user = app.user("grace@example.com").await;
    let plan = app.plan("Pro").await;

    let start_at = Utc::now();
    let response = app
        .send(request(
            "POST",
            "/subscriptions",
            Some(json!({
                "user_id": user.id,
                "plan_id": plan.id,
                "start_at": start_at,
                "end_at": start_at + Duration::days(30),
            })),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: SubscriptionResponse = json_body(response.into_body()).await;
    assert!(created.end_at.is_some());

    let response = app
        .send(request(
            "PUT",
            &format!("/subscriptions/{}", created.id),
            Some(json!({ "end_at": null })),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated: SubscriptionResponse = json_body(response.into_body()).await;
    assert!(updated.end_at.is_none());
    assert_eq!(updated.plan_id, plan.id);
}

#[tokio::test]
async fn test_update_switches_plan() {
    let app = TestApp::new();
    let user = app.user("grace@example.com").await;
    let basic = app.plan("Basic").await;
    let pro = app.plan("Pro").await;

    let response = app.send(subscribe(user.id, basic.id)).await;
    let created: SubscriptionResponse = json_body(response.into_body()).await;

    let response = app
        .send(request(
            "PUT",
            &format!("/subscriptions/{}", created.id),
            Some(json!({ "plan_id": pro.id })),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated: SubscriptionResponse = json_body(response.into_body()).await;
    assert_eq!(updated.plan_id, pro.id);
    assert_eq!(updated.user_id, user.id);
    assert_eq!(updated.start_at, created.start_at);
}

#[tokio::test]
async fn test_list_excludes_deleted_subscriptions() {
    let app = TestApp::new();
    let plan = app.plan("Pro").await;
    let ada = app.user("ada@example.com").await;
    let alan = app.user("alan@example.com").await;

    let response = app.send(subscribe(ada.id, plan.id)).await;
    let kept: SubscriptionResponse = json_body(response.into_body()).await;
    let response = app.send(subscribe(alan.id, plan.id)).await;
    let removed: SubscriptionResponse = json_body(response.into_body()).await;

    app.send(request(
        "DELETE",
        &format!("/subscriptions/{}", removed.id),
        None,
    ))
    .await;

    let response = app
        .send(request("GET", "/subscriptions?sort=start_at,desc", None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page: Page<SubscriptionResponse> = json_body(response.into_body()).await;
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content, vec![kept]);
}

#[tokio::test]
async fn test_list_rejects_unknown_sort_property() {
    let response = TestApp::new()
        .send(request("GET", "/subscriptions?sort=user_id", None))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
