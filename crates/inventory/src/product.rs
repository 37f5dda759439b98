use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{InventoryError, InventoryResult, ProductId};

/// Derived stock status (never stored; computed from stock vs. min_stock).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// stock == 0 → out-of-stock; 0 < stock <= min_stock → low-stock; else in-stock.
    pub fn derive(stock: i64, min_stock: i64) -> Self {
        if stock == 0 {
            StockStatus::OutOfStock
        } else if stock <= min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for StockStatus {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-stock" => Ok(StockStatus::InStock),
            "low-stock" => Ok(StockStatus::LowStock),
            "out-of-stock" => Ok(StockStatus::OutOfStock),
            other => Err(InventoryError::validation(format!(
                "status must be one of: in-stock, low-stock, out-of-stock (got {other:?})"
            ))),
        }
    }
}

/// A product record as held by the store.
///
/// Field names serialize camelCase to match the client wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
    pub min_stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn status(&self) -> StockStatus {
        StockStatus::derive(self.stock, self.min_stock)
    }

    /// Inventory value of this line: price × on-hand stock.
    pub fn stock_value(&self) -> f64 {
        self.price * self.stock as f64
    }
}

/// Input for creating a product. The id and timestamps are assigned by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
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

impl NewProduct {
    pub(crate) fn validate(&self) -> InventoryResult<()> {
        if self.name.trim().is_empty() {
            return Err(InventoryError::validation("name cannot be empty"));
        }
        if self.sku.trim().is_empty() {
            return Err(InventoryError::validation("SKU cannot be empty"));
        }
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        validate_min_stock(self.min_stock)?;
        Ok(())
    }
}

/// Partial update: absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl ProductPatch {
    pub fn stock(stock: i64) -> Self {
        Self {
            stock: Some(stock),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> InventoryResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(InventoryError::validation("name cannot be empty"));
            }
        }
        if let Some(sku) = &self.sku {
            if sku.trim().is_empty() {
                return Err(InventoryError::validation("SKU cannot be empty"));
            }
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
        }
        if let Some(min_stock) = self.min_stock {
            validate_min_stock(min_stock)?;
        }
        Ok(())
    }
}

fn validate_price(price: f64) -> InventoryResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(InventoryError::validation(
            "price must be a non-negative number",
        ));
    }
    Ok(())
}

fn validate_stock(stock: i64) -> InventoryResult<()> {
    if stock < 0 {
        return Err(InventoryError::validation(
            "stock must be a non-negative integer",
        ));
    }
    Ok(())
}

fn validate_min_stock(min_stock: i64) -> InventoryResult<()> {
    if min_stock < 0 {
        return Err(InventoryError::validation(
            "minimum stock must be a non-negative integer",
        ));
    }
    Ok(())
}
