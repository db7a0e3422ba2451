//! API error response plumbing
//!
//! All non-auth failures keep the legacy contract of a 400 with an `error`
//! message; the `code` field is the machine-readable addition that lets
//! callers tell a malformed payload from an unavailable database.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use stockline_common::record::ErrorResponse;

/// Machine-readable code for malformed or incomplete input.
pub const CODE_VALIDATION: &str = "VALIDATION_ERROR";

/// Machine-readable code for storage-layer failures.
pub const CODE_DATABASE: &str = "DATABASE_ERROR";

/// Build a JSON error response with the standard body shape.
pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        error: message.into(),
        code: Some(code.to_string()),
        message: None,
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status() {
        let response = error_response(StatusCode::BAD_REQUEST, CODE_VALIDATION, "nope");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
