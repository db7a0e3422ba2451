//! Middleware for the Stockline server
//!
//! Provides the shared-secret authorization gate applied to all protected
//! routes and the request tracing layer.

use axum::{
    extract::{Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;
use stockline_common::record::ErrorResponse;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Query parameter alternative to the header.
pub const API_KEY_PARAM: &str = "api_key";

/// Configured shared secret, cloned into the auth layer's state.
#[derive(Debug, Clone)]
pub struct ApiKey(Arc<String>);

impl ApiKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::new(secret.into()))
    }

    fn matches(&self, candidate: &str) -> bool {
        !self.0.is_empty() && self.0.as_str() == candidate
    }
}

/// Authorization gate for the protected route set.
///
/// Accepts the secret from the `X-API-KEY` header or the `api_key` query
/// parameter; anything else is rejected with 401 before the handler runs.
/// Mounted with `axum::middleware::from_fn_with_state`.
pub async fn require_api_key(
    State(expected): State<ApiKey>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let supplied = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .or_else(|| params.get(API_KEY_PARAM).map(String::as_str));

    match supplied {
        Some(candidate) if expected.matches(candidate) => next.run(request).await,
        _ => unauthorized(),
    }
}

fn unauthorized() -> Response {
    let body = ErrorResponse {
        error: "Unauthorized".to_string(),
        code: None,
        message: Some("Invalid or missing API key".to_string()),
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

/// Create tracing/logging layer
pub fn tracing_layer(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Micros),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, routing::get, Router};
    use tower::ServiceExt;

    fn protected_app(secret: &str) -> Router {
        Router::new()
            .route("/guarded", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(
                ApiKey::new(secret),
                require_api_key,
            ))
    }

    #[tokio::test]
    async fn missing_key_is_rejected() {
        let app = protected_app("secret");
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_key_is_rejected() {
        let app = protected_app("secret");
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded")
                    .header("X-API-KEY", "guess")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn header_key_is_accepted() {
        let app = protected_app("secret");
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded")
                    .header("X-API-KEY", "secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn query_param_key_is_accepted() {
        let app = protected_app("secret");
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded?api_key=secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_configured_secret_rejects_everything() {
        let app = protected_app("");
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/guarded?api_key=")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
