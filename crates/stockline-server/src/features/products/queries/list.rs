//! Full-table read
//!
//! Returns every stored record in insertion order. Deliberately unpaginated;
//! the catalog is expected to stay small-to-moderate.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// A persisted catalog row as returned to callers.
///
/// The sixteen contract fields keep their wire names; `id` and `created_at`
/// are the server-generated extras.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StoredProduct {
    pub id: i64,

    #[serde(rename = "BarcodeNo")]
    pub barcode_no: String,

    #[serde(rename = "SKU")]
    pub sku: Option<String>,

    #[serde(rename = "Product")]
    pub product: Option<String>,

    #[serde(rename = "Supplier")]
    pub supplier: Option<String>,

    #[serde(rename = "Style")]
    pub style: Option<String>,

    #[serde(rename = "Shade")]
    pub shade: Option<String>,

    #[serde(rename = "Size")]
    pub size: Option<String>,

    #[serde(rename = "Cost")]
    pub cost: f64,

    #[serde(rename = "MRP")]
    pub mrp: f64,

    #[serde(rename = "MOP")]
    pub mop: Option<f64>,

    #[serde(rename = "Dept")]
    pub dept: Option<String>,

    #[serde(rename = "Fabric")]
    pub fabric: Option<String>,

    #[serde(rename = "Warehouse")]
    pub warehouse: Option<String>,

    #[serde(rename = "WHLocation")]
    pub wh_location: Option<String>,

    #[serde(rename = "Qty")]
    pub qty: i32,

    #[serde(rename = "HSNCODE")]
    pub hsn_code: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Errors that can occur when listing products
#[derive(Debug, thiserror::Error)]
pub enum ListProductsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function for the full-table read.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool) -> Result<Vec<StoredProduct>, ListProductsError> {
    let rows = sqlx::query_as::<_, StoredProduct>(
        r#"
        SELECT id, barcode_no, sku, product, supplier, style, shade, size,
               cost, mrp, mop, dept, fabric, warehouse, wh_location, qty,
               hsn_code, created_at
        FROM product_inventory
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    tracing::debug!(count = rows.len(), "Products listed");

    Ok(rows)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stored_product_serializes_with_wire_names() {
        let row = StoredProduct {
            id: 7,
            barcode_no: "B1".to_string(),
            sku: Some("S1".to_string()),
            product: None,
            supplier: None,
            style: None,
            shade: None,
            size: None,
            cost: 10.0,
            mrp: 20.0,
            mop: None,
            dept: None,
            fabric: None,
            warehouse: None,
            wh_location: Some("A-1".to_string()),
            qty: 3,
            hsn_code: None,
            created_at: DateTime::parse_from_rfc3339("2025-08-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["BarcodeNo"], json!("B1"));
        assert_eq!(value["WHLocation"], json!("A-1"));
        assert_eq!(value["Qty"], json!(3));
        assert_eq!(value["id"], json!(7));
        assert!(value.get("barcode_no").is_none());
    }
}
