//! Stockline Server Library
//!
//! HTTP service for ingesting barcoded catalog records into Postgres.
//!
//! # Overview
//!
//! - **API Endpoints**: single and batch record insertion plus a full-table
//!   read, all dedup-safe on the barcode key
//! - **Database**: bounded SQLx connection pool, one implicit transaction per
//!   request
//! - **Auth**: shared-secret API key applied uniformly to the protected
//!   routes, before any handler logic runs
//! - **Configuration**: environment-based with validated defaults
//!
//! # Architecture
//!
//! Each feature is a vertical slice under [`features`] with its own commands
//! (writes), queries (reads), and routes. Handlers are standalone async
//! functions taking the pool and a validated command; every operation defines
//! its own error enum that is mapped to an HTTP response at the route
//! boundary.
//!
//! # Example
//!
//! ```no_run
//! use stockline_server::{api, config::Config, middleware::ApiKey};
//! use sqlx::postgres::PgPoolOptions;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = PgPoolOptions::new().connect(&config.database.url).await?;
//!     let app = api::app(pool, ApiKey::new(config.auth.api_key.clone()));
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod features;
pub mod middleware;
