//! Localizes error responses for the request's `Accept-Language`.

use crate::errors::{ErrorContext, ErrorResponse};
use axum::{
    Json,
    extract::{Request, State},
    http::{
        HeaderValue,
        header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE, CONTENT_LENGTH, CONTENT_TYPE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_i18n::{I18n, Locale};

/// Locale resolved for the current request, available to handlers as
/// `Extension<RequestLocale>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

/// Resolves the request locale and rewrites the `message` of any error
/// response (one carrying an [`ErrorContext`]) in that locale.
///
/// Localized responses get a `Content-Language` header.
pub async fn localize_errors(State(i18n): State<I18n>, mut request: Request, next: Next) -> Response {
    let accept_language = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let locale = i18n.resolve(accept_language);

    request
        .extensions_mut()
        .insert(RequestLocale(locale.clone()));

    let response = next.run(request).await;

    let Some(context) = response.extensions().get::<ErrorContext>().cloned() else {
        return response;
    };

    let message = i18n.message(context.code.message_key(), &locale);
    tracing::debug!(%locale, error = %context.code, "Localizing error response");

    let (parts, _) = response.into_parts();
    let body = ErrorResponse::new(context.code, message, context.details);
    let mut localized = (parts.status, Json(body)).into_response();

    for (name, value) in parts.headers.iter() {
        if name != CONTENT_LENGTH && name != CONTENT_TYPE {
            localized.headers_mut().append(name.clone(), value.clone());
        }
    }
    if let Ok(value) = HeaderValue::from_str(&locale.language_tag()) {
        localized.headers_mut().insert(CONTENT_LANGUAGE, value);
    }

    localized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use axum::{Extension, Router, body::Body, http::StatusCode, middleware, routing::get};
    use core_i18n::I18nConfig;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        let i18n = I18n::from_config(&I18nConfig::default()).unwrap();

        Router::new()
            .route(
                "/missing",
                get(|| async { AppError::NotFound("thing".to_string()) }),
            )
            .route(
                "/locale",
                get(|Extension(RequestLocale(locale)): Extension<RequestLocale>| async move {
                    locale.to_string()
                }),
            )
            .layer(middleware::from_fn_with_state(i18n, localize_errors))
    }

    async fn get_with_language(uri: &str, language: Option<&str>) -> Response {
        let mut request = axum::http::Request::builder().uri(uri);
        if let Some(language) = language {
            request = request.header(ACCEPT_LANGUAGE, language);
        }
        app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn error_body(response: Response) -> ErrorResponse {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_message_uses_default_locale_without_header() {
        let response = get_with_language("/missing", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_LANGUAGE], "en-US");
        assert_eq!(error_body(response).await.message, "Resource not found");
    }

    #[tokio::test]
    async fn test_error_message_in_brazilian_portuguese() {
        let response = get_with_language("/missing", Some("pt-BR")).await;
        assert_eq!(response.headers()[CONTENT_LANGUAGE], "pt-BR");

        let body = error_body(response).await;
        assert_eq!(body.message, "Recurso não encontrado");
        assert_eq!(body.error, "NOT_FOUND");
        assert_eq!(body.status, 404);
    }

    #[tokio::test]
    async fn test_error_message_in_mexican_spanish() {
        let response = get_with_language("/missing", Some("es-MX,es;q=0.9")).await;
        assert_eq!(response.headers()[CONTENT_LANGUAGE], "es-MX");
        assert_eq!(error_body(response).await.message, "Recurso no encontrado");
    }

    #[tokio::test]
    async fn test_success_responses_are_untouched() {
        let response = get_with_language("/locale", Some("pt-BR")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(CONTENT_LANGUAGE).is_none());

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"pt_BR");
    }
}
