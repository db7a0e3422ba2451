//! Catalog record and API wire types
//!
//! The record layout is part of the stable HTTP contract: all sixteen fields
//! must be present as keys in every payload (values may be null for the
//! optional ones). None of the fields carry a serde default on purpose — a
//! payload missing a key is rejected at deserialization, which is how the
//! API distinguishes "malformed record" from "duplicate barcode".

use serde::{Deserialize, Serialize};

/// Status value for a write that persisted a new row.
pub const STATUS_SUCCESS: &str = "success";

/// Status value for a write skipped because the barcode already exists.
pub const STATUS_SKIPPED: &str = "skipped";

/// One catalog item as it travels over the wire.
///
/// `barcode_no` is the sole dedup key. A record whose barcode already exists
/// in storage is skipped, never treated as an error and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
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
}

/// Response body for a batch insert.
///
/// `inserted + skipped` always equals the number of submitted records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub status: String,
    pub inserted: u64,
    pub skipped: u64,
}

/// Response body for a single-record insert.
///
/// An inserted row reports `status: "success"` with the generated id and the
/// stored data; a duplicate reports `status: "skipped"` and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ProductRecord>,
}

/// Response body for the full-table read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub status: String,
    pub count: u64,
    pub data: Vec<T>,
}

/// Error body shared by all failure responses.
///
/// `code` is machine readable; `message` carries the extra detail on auth
/// failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> serde_json::Value {
        json!({
            "BarcodeNo": "8901234567890",
            "SKU": "SKU-1",
            "Product": "Shirt",
            "Supplier": "Acme",
            "Style": "Slim",
            "Shade": null,
            "Size": "M",
            "Cost": 120.5,
            "MRP": 299.0,
            "MOP": null,
            "Dept": "Menswear",
            "Fabric": "Cotton",
            "Warehouse": "WH1",
            "WHLocation": "A-12",
            "Qty": 5,
            "HSNCODE": "6105"
        })
    }

    #[test]
    fn record_round_trips_with_wire_names() {
        let record: ProductRecord = serde_json::from_value(full_payload()).unwrap();
        assert_eq!(record.barcode_no, "8901234567890");
        assert_eq!(record.shade, None);
        assert_eq!(record.mop, None);
        assert_eq!(record.qty, 5);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, full_payload());
    }

    #[test]
    fn record_rejects_missing_field() {
        // All sixteen keys are required, even the nullable ones.
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("WHLocation");
        let result: Result<ProductRecord, _> = serde_json::from_value(payload);
        assert!(result.is_err());
    }

    #[test]
    fn record_rejects_wrongly_typed_field() {
        let mut payload = full_payload();
        payload["Qty"] = json!("five");
        let result: Result<ProductRecord, _> = serde_json::from_value(payload);
        assert!(result.is_err());
    }

    #[test]
    fn skipped_insert_response_omits_id_and_data() {
        let response = InsertResponse {
            status: STATUS_SKIPPED.to_string(),
            id: None,
            data: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"status": "skipped"}));
    }

    #[test]
    fn list_response_tolerates_extra_row_fields() {
        // The server returns stored rows with their generated id; the loader
        // deserializes them back into plain records.
        let mut row = full_payload();
        row.as_object_mut()
            .unwrap()
            .insert("id".to_string(), json!(42));
        let body = json!({"status": "success", "count": 1, "data": [row]});
        let list: ListResponse<ProductRecord> = serde_json::from_value(body).unwrap();
        assert_eq!(list.count, 1);
        assert_eq!(list.data[0].barcode_no, "8901234567890");
    }
}
