//! Batch accumulation and submission loop
//!
//! Drives a complete load: pulls normalized rows off the source, groups them
//! into fixed-size batches, and submits each batch before touching the next
//! row. A batch that fails after its retries is recorded and the run moves
//! on; only a source read failure aborts the run.

use crate::client::ApiClient;
use crate::source::{CsvSource, ParsedRow, SourceError};
use stockline_common::ProductRecord;

/// Default records per batch submission.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Largest batch the server accepts in one call; anything bigger is a
/// guaranteed 400, so oversized requests are capped client-side.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Fatal load errors. Batch-level failures are not here on purpose; they are
/// carried in the summary instead.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Aggregated result of one load run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Rows newly written across all accepted batches.
    pub inserted: u64,
    /// Rows skipped as duplicates across all accepted batches.
    pub skipped: u64,
    /// Batches sent, including ones that ultimately failed.
    pub batches_submitted: u64,
    /// Batches dropped after exhausting retries.
    pub batches_failed: u64,
    /// Source rows rejected during normalization (no barcode).
    pub rows_rejected: u64,
}

impl LoadSummary {
    /// True when every submitted batch was accepted and no row was rejected.
    pub fn is_complete(&self) -> bool {
        self.batches_failed == 0 && self.rows_rejected == 0
    }
}

impl std::fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "inserted {}, skipped {} across {} batches ({} failed, {} rows rejected)",
            self.inserted, self.skipped, self.batches_submitted, self.batches_failed,
            self.rows_rejected
        )
    }
}

/// Run a complete load from `source` into the service behind `client`.
///
/// Strictly sequential: batch N+1 is not built or sent until batch N's
/// submission returns. Restarting an interrupted run from the beginning is
/// safe because every duplicate barcode is a server-side no-op.
pub async fn run(
    source: CsvSource,
    client: &ApiClient,
    batch_size: usize,
) -> Result<LoadSummary, LoaderError> {
    if batch_size > MAX_BATCH_SIZE {
        tracing::warn!(
            requested = batch_size,
            capped = MAX_BATCH_SIZE,
            "Batch size capped at the server's per-call limit"
        );
    }
    let batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
    let mut summary = LoadSummary::default();
    let mut batch: Vec<ProductRecord> = Vec::with_capacity(batch_size);

    for row in source.rows() {
        match row? {
            ParsedRow::Valid(record) => {
                batch.push(record);
                if batch.len() >= batch_size {
                    submit_batch(client, &mut batch, &mut summary).await;
                }
            },
            ParsedRow::Rejected { line, reason } => {
                tracing::warn!(line, %reason, "Rejected source row");
                summary.rows_rejected += 1;
            },
        }
    }

    // Flush the final partial batch.
    if !batch.is_empty() {
        submit_batch(client, &mut batch, &mut summary).await;
    }

    tracing::info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        batches = summary.batches_submitted,
        failed = summary.batches_failed,
        rejected = summary.rows_rejected,
        "Load run finished"
    );

    Ok(summary)
}

async fn submit_batch(client: &ApiClient, batch: &mut Vec<ProductRecord>, summary: &mut LoadSummary) {
    summary.batches_submitted += 1;

    match client.submit_batch(batch).await {
        Ok(result) => {
            summary.inserted += result.inserted;
            summary.skipped += result.skipped;
            tracing::info!(
                inserted = result.inserted,
                skipped = result.skipped,
                "Batch accepted"
            );
        },
        Err(e) => {
            summary.batches_failed += 1;
            tracing::error!(
                error = %e,
                batch_len = batch.len(),
                "Batch dropped after exhausting retries"
            );
        },
    }

    batch.clear();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn summary_display_reports_everything() {
        let summary = LoadSummary {
            inserted: 120,
            skipped: 5,
            batches_submitted: 3,
            batches_failed: 1,
            rows_rejected: 2,
        };
        let text = summary.to_string();
        assert!(text.contains("inserted 120"));
        assert!(text.contains("1 failed"));
        assert!(text.contains("2 rows rejected"));
        assert!(!summary.is_complete());
    }

    #[test]
    fn clean_run_is_complete() {
        let summary = LoadSummary {
            inserted: 10,
            skipped: 0,
            batches_submitted: 1,
            batches_failed: 0,
            rows_rejected: 0,
        };
        assert!(summary.is_complete());
    }
}
