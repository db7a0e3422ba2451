//! Feature modules implementing the Stockline API
//!
//! Each feature is a vertical slice with its own commands (write
//! operations), queries (read operations), and routes. Handlers are
//! standalone async functions invoked directly from the route layer.

pub mod products;

use axum::Router;
use sqlx::PgPool;

/// Creates the API router with all feature routes mounted.
///
/// The caller applies the authorization layer on top; nothing in here checks
/// credentials.
pub fn router(db: PgPool) -> Router<()> {
    Router::new().nest("/products", products::products_routes().with_state(db))
}
