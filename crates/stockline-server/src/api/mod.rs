//! Router assembly and top-level handlers

pub mod response;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use crate::{features, middleware, middleware::ApiKey};

/// Landing page served without authentication.
const INDEX_HTML: &str = include_str!("index.html");

/// Build the application router.
///
/// Everything under `/api` sits behind the API-key gate; the landing page
/// and the health probe do not.
pub fn app(db: PgPool, api_key: ApiKey) -> Router {
    let protected = features::router(db.clone()).layer(axum::middleware::from_fn_with_state(
        api_key,
        middleware::require_api_key,
    ));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .with_state(db)
        .nest("/api", protected)
        .layer(middleware::tracing_layer())
}

/// Landing page handler
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check handler
async fn health_check(State(db): State<PgPool>) -> Result<Response, StatusCode> {
    match sqlx::query("SELECT 1").fetch_one(&db).await {
        Ok(_) => Ok((
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        },
    }
}
