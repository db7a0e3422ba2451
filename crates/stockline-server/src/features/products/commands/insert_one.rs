//! Single-record insert command
//!
//! Inserts one catalog record with insert-or-skip semantics: a barcode that
//! already exists in storage is a no-op reported as a skip, not an error.
//! The SQL is inline in the handler; the batch path uses the same
//! conflict clause.

use sqlx::PgPool;
use stockline_common::ProductRecord;

/// Outcome of a dedup-safe insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written; `id` is the generated identifier.
    Inserted { id: i64 },
    /// The barcode already existed; nothing was written.
    Skipped,
}

/// Errors that can occur when inserting a single record
#[derive(Debug, thiserror::Error)]
pub enum InsertProductError {
    #[error("BarcodeNo is required and cannot be empty")]
    BarcodeRequired,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function for the single-record insert.
///
/// Exactly one row is inserted or zero; the unique constraint on the barcode
/// makes a re-submission of the same record a skip.
#[tracing::instrument(skip(pool, record), fields(barcode = %record.barcode_no))]
pub async fn handle(
    pool: &PgPool,
    record: &ProductRecord,
) -> Result<InsertOutcome, InsertProductError> {
    if record.barcode_no.trim().is_empty() {
        return Err(InsertProductError::BarcodeRequired);
    }

    let inserted_id: Option<i64> = sqlx::query_scalar(
        r#"
        INSERT INTO product_inventory
            (barcode_no, sku, product, supplier, style, shade, size,
             cost, mrp, mop, dept, fabric, warehouse, wh_location, qty, hsn_code)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        ON CONFLICT (barcode_no) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(&record.barcode_no)
    .bind(&record.sku)
    .bind(&record.product)
    .bind(&record.supplier)
    .bind(&record.style)
    .bind(&record.shade)
    .bind(&record.size)
    .bind(record.cost)
    .bind(record.mrp)
    .bind(record.mop)
    .bind(&record.dept)
    .bind(&record.fabric)
    .bind(&record.warehouse)
    .bind(&record.wh_location)
    .bind(record.qty)
    .bind(&record.hsn_code)
    .fetch_optional(pool)
    .await?;

    match inserted_id {
        Some(id) => {
            tracing::info!(id, "Product inserted");
            Ok(InsertOutcome::Inserted { id })
        },
        None => {
            tracing::debug!("Duplicate barcode, insert skipped");
            Ok(InsertOutcome::Skipped)
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn record_with_barcode(barcode: &str) -> ProductRecord {
        ProductRecord {
            barcode_no: barcode.to_string(),
            sku: None,
            product: None,
            supplier: None,
            style: None,
            shade: None,
            size: None,
            cost: 0.0,
            mrp: 0.0,
            mop: None,
            dept: None,
            fabric: None,
            warehouse: None,
            wh_location: None,
            qty: 0,
            hsn_code: None,
        }
    }

    #[tokio::test]
    async fn empty_barcode_fails_before_touching_the_pool() {
        // A lazily-connecting pool never hits the network unless a query runs.
        let pool = PgPool::connect_lazy("postgresql://localhost/unreachable").unwrap();
        let record = record_with_barcode("   ");
        let result = handle(&pool, &record).await;
        assert!(matches!(result, Err(InsertProductError::BarcodeRequired)));
    }
}
