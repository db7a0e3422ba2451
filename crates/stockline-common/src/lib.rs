//! Stockline Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types and utilities for the Stockline workspace.
//!
//! # Overview
//!
//! This crate provides functionality used by both the ingestion server and
//! the batch loader:
//!
//! - **Wire Types**: the catalog record and API response envelopes
//! - **Logging**: `tracing`-based logging bootstrap shared by all binaries
//!
//! # Example
//!
//! ```no_run
//! use stockline_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod record;

pub use record::ProductRecord;
