use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use stockroom_inventory::{ExportOptions, InventoryStore, Product, StockStatus};

use crate::app::dto;

pub fn router() -> Router {
    Router::new()
        .route("/csv", get(export_csv))
        .route("/json", get(export_json))
}

pub async fn export_csv(
    Extension(store): Extension<Arc<InventoryStore>>,
    Query(query): Query<dto::ExportQuery>,
) -> axum::response::Response {
    let options = match parse_options(query) {
        Ok(o) => o,
        Err(resp) => return resp,
    };

    let products = store.products_for_export(&options);
    let csv = render_csv(&products);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, attachment_header("csv")),
        ],
        csv,
    )
        .into_response()
}

pub async fn export_json(
    Extension(store): Extension<Arc<InventoryStore>>,
    Query(query): Query<dto::ExportQuery>,
) -> axum::response::Response {
    let options = match parse_options(query) {
        Ok(o) => o,
        Err(resp) => return resp,
    };

    let products = store.products_for_export(&options);

    (
        StatusCode::OK,
        [(header::CONTENT_DISPOSITION, attachment_header("json"))],
        Json(serde_json::json!({
            "exportDate": Utc::now().to_rfc3339(),
            "totalProducts": products.len(),
            "products": products,
        })),
    )
        .into_response()
}

fn parse_options(query: dto::ExportQuery) -> Result<ExportOptions, axum::response::Response> {
    let mut options = ExportOptions::default();
    if let Some(raw) = query.start_date.as_deref() {
        options.start_date = Some(crate::app::errors::parse_date(raw)?);
    }
    if let Some(raw) = query.end_date.as_deref() {
        options.end_date = Some(crate::app::errors::parse_date(raw)?);
    }
    if let Some(include) = query.include_out_of_stock {
        options.include_out_of_stock = include;
    }
    if let Some(include) = query.include_low_stock {
        options.include_low_stock = include;
    }
    Ok(options)
}

/// Column order is part of the export contract:
/// Name, SKU, Category, Price, Current Stock, Min Stock, Status, Value.
fn render_csv(products: &[Product]) -> String {
    let mut rows = Vec::with_capacity(products.len() + 1);
    rows.push("Name,SKU,Category,Price,Current Stock,Min Stock,Status,Value".to_string());

    for product in products {
        rows.push(
            [
                quote(&product.name),
                quote(&product.sku),
                quote(product.category.as_deref().unwrap_or("Uncategorized")),
                format!("{:.2}", product.price),
                product.stock.to_string(),
                product.min_stock.to_string(),
                quote(status_label(product.status())),
                format!("{:.2}", product.stock_value()),
            ]
            .join(","),
        );
    }

    rows.join("\n")
}

fn status_label(status: StockStatus) -> &'static str {
    match status {
        StockStatus::InStock => "In Stock",
        StockStatus::LowStock => "Low Stock",
        StockStatus::OutOfStock => "Out of Stock",
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn attachment_header(extension: &str) -> String {
    format!(
        "attachment; filename=inventory_export_{}.{extension}",
        Utc::now().format("%Y-%m-%d")
    )
}
