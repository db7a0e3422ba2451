//! Batch insert command
//!
//! Submits a whole batch as one grouped multi-row insert. Duplicates inside
//! the batch or against stored rows are skipped by the conflict clause, so
//! `inserted + skipped` always equals the batch length. A structurally
//! invalid batch never reaches this handler (the typed request body rejects
//! it wholesale), so there is no partial commit to reason about.

use sqlx::{PgPool, Postgres, QueryBuilder};
use stockline_common::ProductRecord;

/// Upper bound on records per call, kept well under the Postgres
/// bind-parameter ceiling (65535 / 16 columns).
pub const MAX_BATCH_RECORDS: usize = 1000;

/// Command to insert a batch of records in one grouped write.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct InsertBatchCommand {
    pub records: Vec<ProductRecord>,
}

/// Per-batch write counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub inserted: u64,
    pub skipped: u64,
}

/// Errors that can occur when inserting a batch
#[derive(Debug, thiserror::Error)]
pub enum InsertBatchError {
    #[error("No records provided")]
    Empty,

    #[error("Batch of {len} records exceeds the limit of {MAX_BATCH_RECORDS}")]
    TooLarge { len: usize },

    #[error("Record {index} has an empty BarcodeNo")]
    BarcodeRequired { index: usize },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl InsertBatchCommand {
    /// Validates the command parameters
    pub fn validate(&self) -> Result<(), InsertBatchError> {
        if self.records.is_empty() {
            return Err(InsertBatchError::Empty);
        }

        if self.records.len() > MAX_BATCH_RECORDS {
            return Err(InsertBatchError::TooLarge {
                len: self.records.len(),
            });
        }

        for (index, record) in self.records.iter().enumerate() {
            if record.barcode_no.trim().is_empty() {
                return Err(InsertBatchError::BarcodeRequired { index });
            }
        }

        Ok(())
    }
}

/// Handler function for the batch insert.
///
/// One SQL statement for the whole batch: all rows are written in a single
/// implicit transaction, and `rows_affected` is the inserted count. Skips
/// are the remainder.
#[tracing::instrument(skip(pool, command), fields(batch_len = command.records.len()))]
pub async fn handle(
    pool: &PgPool,
    command: &InsertBatchCommand,
) -> Result<BatchOutcome, InsertBatchError> {
    command.validate()?;

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO product_inventory \
         (barcode_no, sku, product, supplier, style, shade, size, \
          cost, mrp, mop, dept, fabric, warehouse, wh_location, qty, hsn_code) ",
    );

    builder.push_values(command.records.iter(), |mut row, record| {
        row.push_bind(&record.barcode_no)
            .push_bind(&record.sku)
            .push_bind(&record.product)
            .push_bind(&record.supplier)
            .push_bind(&record.style)
            .push_bind(&record.shade)
            .push_bind(&record.size)
            .push_bind(record.cost)
            .push_bind(record.mrp)
            .push_bind(record.mop)
            .push_bind(&record.dept)
            .push_bind(&record.fabric)
            .push_bind(&record.warehouse)
            .push_bind(&record.wh_location)
            .push_bind(record.qty)
            .push_bind(&record.hsn_code);
    });

    builder.push(" ON CONFLICT (barcode_no) DO NOTHING");

    let result = builder.build().execute(pool).await?;

    let inserted = result.rows_affected();
    let skipped = command.records.len() as u64 - inserted;

    tracing::info!(inserted, skipped, "Batch write completed");

    Ok(BatchOutcome { inserted, skipped })
}
