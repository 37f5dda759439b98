use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use stockroom_core::InventoryError;
use stockroom_inventory::{SortField, SortOrder, StockStatus};

/// Map a domain failure to a user-visible response.
pub fn store_error_to_response(err: InventoryError) -> axum::response::Response {
    match err {
        InventoryError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        InventoryError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        InventoryError::DuplicateSku(_) => {
            json_error(StatusCode::CONFLICT, "duplicate_sku", "SKU already exists")
        }
        err @ InventoryError::NegativeStock { .. } => {
            json_error(StatusCode::BAD_REQUEST, "negative_stock", err.to_string())
        }
        InventoryError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Parse the `status` query value; `"all"` means no status filter.
pub fn parse_status_filter(s: &str) -> Result<Option<StockStatus>, axum::response::Response> {
    if s == "all" {
        return Ok(None);
    }
    s.parse::<StockStatus>()
        .map(Some)
        .map_err(|e| json_error(StatusCode::BAD_REQUEST, "invalid_query", e.to_string()))
}

pub fn parse_sort_field(s: &str) -> Result<SortField, axum::response::Response> {
    s.parse::<SortField>()
        .map_err(|e| json_error(StatusCode::BAD_REQUEST, "invalid_query", e.to_string()))
}

pub fn parse_sort_order(s: &str) -> Result<SortOrder, axum::response::Response> {
    s.parse::<SortOrder>()
        .map_err(|e| json_error(StatusCode::BAD_REQUEST, "invalid_query", e.to_string()))
}

/// Parse a date query value: RFC3339, or a bare `YYYY-MM-DD` taken as
/// midnight UTC.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, axum::response::Response> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(date) = s.parse::<NaiveDate>() {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(json_error(
        StatusCode::BAD_REQUEST,
        "invalid_query",
        format!("invalid date: {s:?} (expected RFC3339 or YYYY-MM-DD)"),
    ))
}
