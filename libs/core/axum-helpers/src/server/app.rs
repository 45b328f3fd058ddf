use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use crate::http::{localize_errors, security_headers};
use axum::{Router, http::StatusCode, middleware};
use core_config::server::ServerConfig;
use core_i18n::I18n;
use std::future::Future;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

/// Wraps the API routes with the cross-cutting layers:
///
/// - localized 404 fallback for unknown routes
/// - error localization from `Accept-Language`
/// - request timeout (408 once `server_config.request_timeout` elapses)
/// - request tracing, security headers and compression
///
/// Routes are mounted at the root; domain routers should already have their
/// state applied.
pub fn create_router(apis: Router, i18n: I18n, server_config: &ServerConfig) -> Router {
    Router::new()
        .merge(apis)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(i18n, localize_errors))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server_config.request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(CompressionLayer::new())
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup`.
///
/// In-flight requests are drained before `cleanup` starts.
///
/// # Errors
/// Returns an error if the listener fails to bind or the server fails.
///
/// # Example
/// ```ignore
/// let db_for_cleanup = db.clone();
/// create_app(router, &config.server, async move {
///     db_for_cleanup.close().await.ok();
/// })
/// .await?;
/// ```
pub async fn create_app<F>(router: Router, server_config: &ServerConfig, cleanup: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Server stopped, running cleanup");
    cleanup.await;

    serve_result
}
