//! Product inventory feature
//!
//! Dedup-safe ingestion of catalog records keyed on the barcode:
//!
//! - `commands/` - single and batch inserts with insert-or-skip semantics
//! - `queries/` - full-table read
//! - `routes.rs` - HTTP wiring and error mapping

pub mod commands;
pub mod queries;
pub mod routes;

pub use routes::products_routes;
