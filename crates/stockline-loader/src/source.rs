//! Streaming CSV source
//!
//! Reads the catalog export one row at a time and normalizes each row into a
//! [`ProductRecord`]. The file is never held in memory as a whole; the
//! iterator pulls rows off the underlying reader on demand.
//!
//! Normalization rules (positional, sixteen columns, header row skipped):
//! empty or missing string cells become null; `Cost`/`MRP` parse with a 0.0
//! default; `MOP` maps an absent value to null instead of a default; `Qty`
//! defaults to 0. A row without a usable barcode cannot take part in
//! dedup and is reported as a reject rather than aborting the run.

use std::fs::File;
use std::path::{Path, PathBuf};
use stockline_common::ProductRecord;

/// Errors reading the source dataset. All of these are fatal to a run.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to open source file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read source row: {0}")]
    Read(#[from] csv::Error),
}

/// One normalized source row.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRow {
    Valid(ProductRecord),
    /// The row cannot be submitted (no barcode); counted, not fatal.
    Rejected { line: u64, reason: String },
}

/// Streaming reader over a catalog CSV file.
pub struct CsvSource {
    reader: csv::Reader<File>,
}

impl CsvSource {
    /// Open the file in read-only streaming mode. The first row is treated
    /// as a header and skipped.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        Ok(Self { reader })
    }

    /// Lazy sequence of normalized rows. A mid-stream read error surfaces as
    /// `Err` and ends the run.
    pub fn rows(self) -> impl Iterator<Item = Result<ParsedRow, SourceError>> {
        self.reader.into_records().map(|result| {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            Ok(normalize_row(&record, line))
        })
    }
}

/// Map one raw row onto the record schema.
pub fn normalize_row(row: &csv::StringRecord, line: u64) -> ParsedRow {
    let cell = |index: usize| {
        row.get(index)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let Some(barcode_no) = cell(0).map(str::to_string) else {
        return ParsedRow::Rejected {
            line,
            reason: "empty BarcodeNo".to_string(),
        };
    };

    ParsedRow::Valid(ProductRecord {
        barcode_no,
        sku: cell(1).map(str::to_string),
        product: cell(2).map(str::to_string),
        supplier: cell(3).map(str::to_string),
        style: cell(4).map(str::to_string),
        shade: cell(5).map(str::to_string),
        size: cell(6).map(str::to_string),
        cost: cell(7).and_then(|v| v.parse().ok()).unwrap_or(0.0),
        mrp: cell(8).and_then(|v| v.parse().ok()).unwrap_or(0.0),
        mop: cell(9).and_then(|v| v.parse().ok()),
        dept: cell(10).map(str::to_string),
        fabric: cell(11).map(str::to_string),
        warehouse: cell(12).map(str::to_string),
        wh_location: cell(13).map(str::to_string),
        qty: cell(14).and_then(|v| v.parse().ok()).unwrap_or(0),
        hsn_code: cell(15).map(str::to_string),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(values.to_vec())
    }

    #[test]
    fn full_row_normalizes_every_field() {
        let parsed = normalize_row(
            &row(&[
                "8901", "SKU-1", "Shirt", "Acme", "Slim", "Blue", "M", "120.5", "299", "249",
                "Menswear", "Cotton", "WH1", "A-12", "5", "6105",
            ]),
            2,
        );

        let ParsedRow::Valid(record) = parsed else {
            panic!("expected a valid row");
        };
        assert_eq!(record.barcode_no, "8901");
        assert_eq!(record.shade.as_deref(), Some("Blue"));
        assert_eq!(record.cost, 120.5);
        assert_eq!(record.mrp, 299.0);
        assert_eq!(record.mop, Some(249.0));
        assert_eq!(record.qty, 5);
        assert_eq!(record.hsn_code.as_deref(), Some("6105"));
    }

    #[test]
    fn empty_cells_become_null_and_numeric_defaults_apply() {
        let parsed = normalize_row(
            &row(&[
                "8902", "", "  ", "", "", "", "", "", "", "", "", "", "", "", "", "",
            ]),
            3,
        );

        let ParsedRow::Valid(record) = parsed else {
            panic!("expected a valid row");
        };
        assert_eq!(record.sku, None);
        assert_eq!(record.product, None);
        assert_eq!(record.cost, 0.0);
        assert_eq!(record.mrp, 0.0);
        // MOP has no default: absent stays null.
        assert_eq!(record.mop, None);
        assert_eq!(record.qty, 0);
    }

    #[test]
    fn short_row_is_padded_with_nulls() {
        let parsed = normalize_row(&row(&["8903", "SKU-3"]), 4);

        let ParsedRow::Valid(record) = parsed else {
            panic!("expected a valid row");
        };
        assert_eq!(record.barcode_no, "8903");
        assert_eq!(record.sku.as_deref(), Some("SKU-3"));
        assert_eq!(record.warehouse, None);
        assert_eq!(record.qty, 0);
    }

    #[test]
    fn unparseable_numbers_fall_back_to_defaults() {
        let parsed = normalize_row(
            &row(&[
                "8904", "", "", "", "", "", "", "n/a", "n/a", "n/a", "", "", "", "", "many", "",
            ]),
            5,
        );

        let ParsedRow::Valid(record) = parsed else {
            panic!("expected a valid row");
        };
        assert_eq!(record.cost, 0.0);
        assert_eq!(record.mrp, 0.0);
        assert_eq!(record.mop, None);
        assert_eq!(record.qty, 0);
    }

    #[test]
    fn missing_barcode_is_rejected_with_line_number() {
        let parsed = normalize_row(&row(&["", "SKU-5"]), 7);
        assert_eq!(
            parsed,
            ParsedRow::Rejected {
                line: 7,
                reason: "empty BarcodeNo".to_string()
            }
        );
    }

    #[test]
    fn open_missing_file_is_fatal() {
        let result = CsvSource::open(Path::new("/nonexistent/itemmaster.csv"));
        assert!(matches!(result, Err(SourceError::Open { .. })));
    }
}
