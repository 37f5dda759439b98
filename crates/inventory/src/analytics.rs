use std::collections::BTreeMap;

use serde::Serialize;

use crate::history::StockHistoryEntry;

/// Aggregate dashboard figures derived from the current store contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_products: usize,
    /// Σ price × stock over all products.
    pub total_value: f64,
    /// Products with 0 < stock <= min_stock.
    pub low_stock_count: usize,
    /// Products with stock == 0.
    pub out_of_stock_count: usize,
    /// Product count per category; products without one fall under "Uncategorized".
    pub categories: BTreeMap<String, usize>,
    /// The 10 most recent history entries, newest first.
    pub recent_activity: Vec<StockHistoryEntry>,
}
