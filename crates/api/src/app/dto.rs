use axum::http::StatusCode;
use serde::Deserialize;

use stockroom_inventory::{NewProduct, ProductPatch};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
    pub min_stock: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl CreateProductRequest {
    /// Boundary-level input check; the store re-validates defensively.
    pub fn validate(&self) -> Result<(), axum::response::Response> {
        check_non_negative("price", self.price)?;
        check_non_negative("stock", self.stock as f64)?;
        check_non_negative("minStock", self.min_stock as f64)?;
        Ok(())
    }

    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            sku: self.sku,
            price: self.price,
            stock: self.stock,
            min_stock: self.min_stock,
            description: self.description,
            category: self.category,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), axum::response::Response> {
        if let Some(price) = self.price {
            check_non_negative("price", price)?;
        }
        if let Some(stock) = self.stock {
            check_non_negative("stock", stock as f64)?;
        }
        if let Some(min_stock) = self.min_stock {
            check_non_negative("minStock", min_stock as f64)?;
        }
        Ok(())
    }

    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            sku: self.sku,
            price: self.price,
            stock: self.stock,
            min_stock: self.min_stock,
            description: self.description,
            category: self.category,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockRequest {
    pub delta: i64,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListProductsQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryQuery {
    pub product_id: Option<String>,
    /// Result-count cap, applied after retrieval.
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub include_out_of_stock: Option<bool>,
    pub include_low_stock: Option<bool>,
}

fn check_non_negative(field: &str, value: f64) -> Result<(), axum::response::Response> {
    if !value.is_finite() || value < 0.0 {
        return Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_input",
            format!("{field} must be a non-negative number"),
        ));
    }
    Ok(())
}
