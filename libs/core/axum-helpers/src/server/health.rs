use crate::errors::AppError;
use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// A boxed future for health checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs multiple health checks concurrently.
///
/// Returns `{"status": "ready", "<name>": "connected", ...}` when every check
/// passes, otherwise a `SERVICE_UNAVAILABLE` error naming the failed checks.
///
/// # Example
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture)> = vec![(
///     "database",
///     Box::pin(async move { check_health(&db).await.map_err(|e| e.to_string()) }),
/// )];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<Json<Value>, AppError> {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let futures: Vec<_> = checks.into_iter().map(|(_, check)| check).collect();
    let results = join_all(futures).await;

    let mut services = Map::new();
    let mut failed = Vec::new();

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(()) => {
                services.insert(name.to_string(), json!("connected"));
            }
            Err(e) => {
                tracing::error!("Readiness check failed: {} error: {:?}", name, e);
                failed.push(name);
            }
        }
    }

    if !failed.is_empty() {
        return Err(AppError::ServiceUnavailable(format!(
            "readiness checks failed: {}",
            failed.join(", ")
        )));
    }

    services.insert("status".to_string(), json!("ready"));
    Ok(Json(Value::Object(services)))
}

/// Liveness: always 200 while the process is serving.
pub async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    })
}

/// Creates a router with the /health endpoint.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let app = Router::new()
///     .merge(health_router(app_info!()))
///     .merge(ready_router(state));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_all_checks_pass() {
        let checks: Vec<(&str, HealthCheckFuture)> = vec![
            ("database", Box::pin(async { Ok(()) })),
            ("cache", Box::pin(async { Ok(()) })),
        ];

        let Json(body) = run_health_checks(checks).await.unwrap();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["database"], "connected");
        assert_eq!(body["cache"], "connected");
    }

    #[tokio::test]
    async fn test_failed_check_is_service_unavailable() {
        let checks: Vec<(&str, HealthCheckFuture)> = vec![
            ("database", Box::pin(async { Err("connection refused".to_string()) })),
            ("cache", Box::pin(async { Ok(()) })),
        ];

        let err = run_health_checks(checks).await.unwrap_err();
        assert!(matches!(err, AppError::ServiceUnavailable(ref msg) if msg.contains("database")));
    }

    #[tokio::test]
    async fn test_health_endpoint_reports_app_info() {
        let app = health_router(AppInfo {
            name: "hub_api",
            version: "1.2.3",
        });

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "hub_api");
        assert_eq!(body["version"], "1.2.3");
    }
}
