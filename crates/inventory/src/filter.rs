use chrono::{DateTime, Utc};

use stockroom_core::InventoryError;

use crate::product::StockStatus;

/// Sortable product fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    Stock,
    UpdatedAt,
}

impl core::str::FromStr for SortField {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "price" => Ok(SortField::Price),
            "stock" => Ok(SortField::Stock),
            "updatedAt" | "updated_at" => Ok(SortField::UpdatedAt),
            other => Err(InventoryError::validation(format!(
                "sortBy must be one of: name, price, stock, updatedAt (got {other:?})"
            ))),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl core::str::FromStr for SortOrder {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(InventoryError::validation(format!(
                "sortOrder must be asc or desc (got {other:?})"
            ))),
        }
    }
}

/// Listing filters; all optional, composed with AND semantics.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match against name, SKU, or description.
    pub search: Option<String>,
    /// Restrict to one derived status.
    pub status: Option<StockStatus>,
    /// Exact category match.
    pub category: Option<String>,
    /// No sort field means insertion order.
    pub sort_by: Option<SortField>,
    pub sort_order: SortOrder,
}

/// Export selection options.
///
/// `include_low_stock = false` keeps only products with stock strictly above
/// min_stock, which also excludes out-of-stock products regardless of
/// `include_out_of_stock`. Export consumers rely on that comparison; see
/// DESIGN.md before changing it.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Inclusive lower bound on created_at.
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on created_at.
    pub end_date: Option<DateTime<Utc>>,
    pub include_out_of_stock: bool,
    pub include_low_stock: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            include_out_of_stock: true,
            include_low_stock: true,
        }
    }
}
