//! `stockroom-inventory` — the inventory state-management service.
//!
//! Owns the two in-memory collections (products, stock history), enforces the
//! domain invariants (unique SKU, non-negative stock, one history entry per
//! stock change), and derives analytics and export sets. Consumers reach it
//! through [`InventoryStore`]; the HTTP boundary lives in `stockroom-api`.

pub mod analytics;
pub mod filter;
pub mod history;
pub mod product;
pub mod store;

pub use analytics::Analytics;
pub use filter::{ExportOptions, ProductFilter, SortField, SortOrder};
pub use history::StockHistoryEntry;
pub use product::{NewProduct, Product, ProductPatch, StockStatus};
pub use store::{IdSource, InventoryStore, SequentialIdSource, UuidIdSource};
