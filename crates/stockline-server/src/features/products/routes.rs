//! Product API routes
//!
//! Wires the insert commands and the list query to Axum handlers.
//!
//! # Route Structure
//!
//! - `POST /api/products` - Insert a single record (201 inserted, 200 skipped)
//! - `POST /api/products/batch` - Insert a batch in one grouped write
//! - `GET /api/products` - List every stored record
//!
//! A malformed request body (missing field, wrong type, invalid JSON) fails
//! the whole request with 400 before any handler logic runs; for the batch
//! route this is the all-or-nothing contract — no partial commit, no
//! per-record error detail.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sqlx::PgPool;
use stockline_common::record::{
    BatchResponse, InsertResponse, ListResponse, ProductRecord, STATUS_SKIPPED, STATUS_SUCCESS,
};

use super::{
    commands::{self, InsertBatchCommand, InsertBatchError, InsertOutcome, InsertProductError},
    queries::{self, ListProductsError},
};
use crate::api::response::{error_response, CODE_DATABASE, CODE_VALIDATION};

/// Creates the products router with all routes configured
pub fn products_routes() -> Router<PgPool> {
    Router::new()
        .route("/", post(insert_product))
        .route("/", get(list_products))
        .route("/batch", post(insert_product_batch))
}

/// Insert a single record
///
/// # Endpoint
///
/// `POST /api/products`
///
/// # Response
///
/// - `201 Created` with `{status, id, data}` - record newly inserted
/// - `200 OK` with `{status: "skipped"}` - barcode already stored
/// - `400 Bad Request` - malformed body or database failure
#[tracing::instrument(skip(pool, payload))]
async fn insert_product(
    State(pool): State<PgPool>,
    payload: Result<Json<ProductRecord>, JsonRejection>,
) -> Result<Response, ProductApiError> {
    let Json(record) = payload?;

    match commands::insert_one::handle(&pool, &record).await? {
        InsertOutcome::Inserted { id } => {
            let body = InsertResponse {
                status: STATUS_SUCCESS.to_string(),
                id: Some(id),
                data: Some(record),
            };
            Ok((StatusCode::CREATED, Json(body)).into_response())
        },
        InsertOutcome::Skipped => {
            let body = InsertResponse {
                status: STATUS_SKIPPED.to_string(),
                id: None,
                data: None,
            };
            Ok((StatusCode::OK, Json(body)).into_response())
        },
    }
}

/// Insert a batch of records in one grouped write
///
/// # Endpoint
///
/// `POST /api/products/batch`
///
/// # Response
///
/// - `201 Created` with `{status, inserted, skipped}` - batch processed;
///   `inserted + skipped` equals the number of submitted records
/// - `400 Bad Request` - empty batch, malformed record, or database failure
#[tracing::instrument(skip(pool, payload))]
async fn insert_product_batch(
    State(pool): State<PgPool>,
    payload: Result<Json<InsertBatchCommand>, JsonRejection>,
) -> Result<Response, ProductApiError> {
    let Json(command) = payload?;

    let outcome = commands::insert_batch::handle(&pool, &command).await?;

    let body = BatchResponse {
        status: STATUS_SUCCESS.to_string(),
        inserted: outcome.inserted,
        skipped: outcome.skipped,
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// List every stored record
///
/// # Endpoint
///
/// `GET /api/products`
///
/// # Response
///
/// - `200 OK` with `{status, count, data}` - full table in insertion order
/// - `400 Bad Request` - database failure
#[tracing::instrument(skip(pool))]
async fn list_products(State(pool): State<PgPool>) -> Result<Response, ProductApiError> {
    let rows = queries::list::handle(&pool).await?;

    let body = ListResponse {
        status: STATUS_SUCCESS.to_string(),
        count: rows.len() as u64,
        data: rows,
    };
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// Unified error type for product API endpoints
#[derive(Debug)]
enum ProductApiError {
    InvalidBody(JsonRejection),
    Insert(InsertProductError),
    Batch(InsertBatchError),
    List(ListProductsError),
}

impl From<JsonRejection> for ProductApiError {
    fn from(err: JsonRejection) -> Self {
        Self::InvalidBody(err)
    }
}

impl From<InsertProductError> for ProductApiError {
    fn from(err: InsertProductError) -> Self {
        Self::Insert(err)
    }
}

impl From<InsertBatchError> for ProductApiError {
    fn from(err: InsertBatchError) -> Self {
        Self::Batch(err)
    }
}

impl From<ListProductsError> for ProductApiError {
    fn from(err: ListProductsError) -> Self {
        Self::List(err)
    }
}

impl IntoResponse for ProductApiError {
    fn into_response(self) -> Response {
        match self {
            ProductApiError::InvalidBody(rejection) => error_response(
                StatusCode::BAD_REQUEST,
                CODE_VALIDATION,
                rejection.body_text(),
            ),

            ProductApiError::Insert(InsertProductError::BarcodeRequired) => {
                error_response(StatusCode::BAD_REQUEST, CODE_VALIDATION, self.to_string())
            },
            ProductApiError::Insert(InsertProductError::Database(_)) => {
                tracing::error!("Database error during single insert: {}", self);
                error_response(
                    StatusCode::BAD_REQUEST,
                    CODE_DATABASE,
                    "A database error occurred",
                )
            },

            ProductApiError::Batch(InsertBatchError::Empty)
            | ProductApiError::Batch(InsertBatchError::TooLarge { .. })
            | ProductApiError::Batch(InsertBatchError::BarcodeRequired { .. }) => {
                error_response(StatusCode::BAD_REQUEST, CODE_VALIDATION, self.to_string())
            },
            ProductApiError::Batch(InsertBatchError::Database(_)) => {
                tracing::error!("Database error during batch insert: {}", self);
                error_response(
                    StatusCode::BAD_REQUEST,
                    CODE_DATABASE,
                    "A database error occurred",
                )
            },

            ProductApiError::List(ListProductsError::Database(_)) => {
                tracing::error!("Database error during listing: {}", self);
                error_response(
                    StatusCode::BAD_REQUEST,
                    CODE_DATABASE,
                    "A database error occurred",
                )
            },
        }
    }
}

impl std::fmt::Display for ProductApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBody(e) => write!(f, "{}", e.body_text()),
            Self::Insert(e) => write!(f, "{}", e),
            Self::Batch(e) => write!(f, "{}", e),
            Self::List(e) => write!(f, "{}", e),
        }
    }
}
