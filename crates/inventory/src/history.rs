use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{HistoryId, ProductId};

/// Immutable record of one stock-level change.
///
/// `product_id` is a weak reference: entries survive product deletion and
/// remain valid for display. `product_name` is a snapshot taken at the time
/// of the change and is never re-synced after a rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockHistoryEntry {
    pub id: HistoryId,
    pub product_id: ProductId,
    pub product_name: String,
    pub change: i64,
    pub previous_stock: i64,
    pub new_stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}
