//! Stockline Loader Library
//!
//! Streams a catalog CSV into the Stockline ingestion service in fixed-size
//! batches, tolerating transient failures without losing track of what
//! happened.
//!
//! # Pipeline
//!
//! source rows -> normalized records -> batches -> HTTP submission ->
//! aggregated [`loader::LoadSummary`]
//!
//! The source is read in streaming mode so the dataset may be arbitrarily
//! larger than memory; at most one batch is in flight at a time, keeping
//! submission order deterministic.
//!
//! # Example
//!
//! ```no_run
//! use stockline_loader::{client::ApiClient, loader, source::CsvSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ApiClient::new("http://localhost:8000".to_string(), "secret".to_string())?;
//!     let source = CsvSource::open("itemmaster.csv".as_ref())?;
//!     let summary = loader::run(source, &client, loader::DEFAULT_BATCH_SIZE).await?;
//!     tracing::info!(%summary, "load finished");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod loader;
pub mod source;
