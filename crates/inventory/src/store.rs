use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicU64};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use stockroom_core::{HistoryId, InventoryError, InventoryResult, ProductId};

use crate::analytics::Analytics;
use crate::filter::{ExportOptions, ProductFilter, SortField, SortOrder};
use crate::history::StockHistoryEntry;
use crate::product::{NewProduct, Product, ProductPatch};

/// Global cap on retained history entries (oldest evicted first).
const HISTORY_CAP: usize = 1000;

/// Number of history entries surfaced as recent activity in analytics.
const RECENT_ACTIVITY_LEN: usize = 10;

const REASON_INITIAL_STOCK: &str = "Initial stock";
const REASON_MANUAL_ADDITION: &str = "Manual stock addition";
const REASON_MANUAL_REDUCTION: &str = "Manual stock reduction";

/// Product id generation strategy.
///
/// Injectable so tests can assert deterministic ids instead of relying on
/// time-ordered UUIDs.
pub trait IdSource: Send + Sync {
    fn next_product_id(&self) -> ProductId;
}

/// Default id source: time-ordered UUIDv7.
#[derive(Debug, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_product_id(&self) -> ProductId {
        ProductId::new()
    }
}

/// Deterministic id source for tests: 1, 2, 3, ... encoded as UUIDs.
#[derive(Debug, Default)]
pub struct SequentialIdSource(AtomicU64);

impl IdSource for SequentialIdSource {
    fn next_product_id(&self) -> ProductId {
        let n = self.0.fetch_add(1, atomic::Ordering::Relaxed) + 1;
        ProductId::from_uuid(Uuid::from_u128(u128::from(n)))
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    /// Insertion order == creation order; listing/export rely on it.
    products: Vec<Product>,
    /// Canonical order: newest first.
    history: Vec<StockHistoryEntry>,
    next_history_id: u64,
}

impl StoreInner {
    fn push_history(
        &mut self,
        product_id: ProductId,
        product_name: &str,
        change: i64,
        previous_stock: i64,
        reason: Option<&str>,
        timestamp: DateTime<Utc>,
    ) {
        self.next_history_id += 1;
        let entry = StockHistoryEntry {
            id: HistoryId(self.next_history_id),
            product_id,
            product_name: product_name.to_string(),
            change,
            previous_stock,
            new_stock: previous_stock + change,
            reason: reason.map(str::to_string),
            timestamp,
        };
        self.history.insert(0, entry);
        self.history.truncate(HISTORY_CAP);
    }

    /// Shared update path for `update_product` and `adjust_stock`.
    ///
    /// Validates fully before touching either collection; a rejected update
    /// leaves products and history unchanged.
    fn update(
        &mut self,
        id: &ProductId,
        patch: ProductPatch,
        reason_override: Option<&str>,
        now: DateTime<Utc>,
    ) -> InventoryResult<Product> {
        patch.validate()?;

        let pos = self
            .products
            .iter()
            .position(|p| p.id == *id)
            .ok_or(InventoryError::NotFound)?;

        if let Some(sku) = &patch.sku {
            if *sku != self.products[pos].sku
                && self.products.iter().any(|p| p.id != *id && p.sku == *sku)
            {
                return Err(InventoryError::duplicate_sku(sku));
            }
        }

        let previous_stock = self.products[pos].stock;
        {
            let product = &mut self.products[pos];
            if let Some(name) = patch.name {
                product.name = name;
            }
            if let Some(sku) = patch.sku {
                product.sku = sku;
            }
            if let Some(price) = patch.price {
                product.price = price;
            }
            if let Some(stock) = patch.stock {
                product.stock = stock;
            }
            if let Some(min_stock) = patch.min_stock {
                product.min_stock = min_stock;
            }
            if let Some(description) = patch.description {
                product.description = Some(description);
            }
            if let Some(category) = patch.category {
                product.category = Some(category);
            }
            product.updated_at = now;
        }

        let product = self.products[pos].clone();
        let change = product.stock - previous_stock;
        if change != 0 {
            let fallback = if change > 0 {
                REASON_MANUAL_ADDITION
            } else {
                REASON_MANUAL_REDUCTION
            };
            // Name snapshot is taken after the patch: a rename in the same
            // update is reflected in the entry.
            self.push_history(
                product.id,
                &product.name,
                change,
                previous_stock,
                Some(reason_override.unwrap_or(fallback)),
                now,
            );
        }

        Ok(product)
    }
}

/// The inventory store: exclusive owner of the product and history collections.
///
/// One instance per process, shared as `Arc<InventoryStore>`. Both collections
/// live behind a single lock so every logical operation (a product mutation
/// plus the history append it triggers) is observed atomically.
pub struct InventoryStore {
    inner: RwLock<StoreInner>,
    ids: Box<dyn IdSource>,
}

impl core::fmt::Debug for InventoryStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryStore").finish_non_exhaustive()
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::with_id_source(Box::new(UuidIdSource))
    }

    pub fn with_id_source(ids: Box<dyn IdSource>) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            ids,
        }
    }

    // Operations never panic while holding the lock, so a poisoned guard
    // still contains consistent state.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a product and log its initial stock as a change from zero.
    pub fn create_product(&self, new: NewProduct) -> InventoryResult<Product> {
        new.validate()?;

        let mut inner = self.write();
        if inner.products.iter().any(|p| p.sku == new.sku) {
            return Err(InventoryError::duplicate_sku(&new.sku));
        }

        let now = Utc::now();
        let product = Product {
            id: self.ids.next_product_id(),
            name: new.name,
            sku: new.sku,
            price: new.price,
            stock: new.stock,
            min_stock: new.min_stock,
            description: new.description,
            category: new.category,
            created_at: now,
            updated_at: now,
        };

        inner.push_history(
            product.id,
            &product.name,
            product.stock,
            0,
            Some(REASON_INITIAL_STOCK),
            now,
        );
        inner.products.push(product.clone());

        Ok(product)
    }

    /// Read-only lookup by id.
    pub fn get_product(&self, id: &ProductId) -> Option<Product> {
        self.read().products.iter().find(|p| p.id == *id).cloned()
    }

    /// Filtered, sorted snapshot of the product collection.
    ///
    /// Sorting is stable; ties keep insertion order.
    pub fn list_products(&self, filter: &ProductFilter) -> Vec<Product> {
        let inner = self.read();

        let search = filter.search.as_deref().map(str::to_lowercase);
        let mut products: Vec<Product> = inner
            .products
            .iter()
            .filter(|p| {
                if let Some(needle) = &search {
                    let hit = p.name.to_lowercase().contains(needle)
                        || p.sku.to_lowercase().contains(needle)
                        || p.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(needle));
                    if !hit {
                        return false;
                    }
                }
                if let Some(status) = filter.status {
                    if p.status() != status {
                        return false;
                    }
                }
                if let Some(category) = &filter.category {
                    if p.category.as_deref() != Some(category.as_str()) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        if let Some(field) = filter.sort_by {
            products.sort_by(|a, b| {
                let ordering = match field {
                    SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                    SortField::Price => a.price.total_cmp(&b.price),
                    SortField::Stock => a.stock.cmp(&b.stock),
                    SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                };
                match filter.sort_order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        products
    }

    /// Partial update. Refreshes updated_at regardless of which fields
    /// changed; a stock change additionally logs one history entry.
    pub fn update_product(&self, id: &ProductId, patch: ProductPatch) -> InventoryResult<Product> {
        self.write().update(id, patch, None, Utc::now())
    }

    /// Hard delete. Returns whether the product existed. History entries
    /// referencing the product are retained.
    pub fn delete_product(&self, id: &ProductId) -> bool {
        let mut inner = self.write();
        let before = inner.products.len();
        inner.products.retain(|p| p.id != *id);
        inner.products.len() != before
    }

    /// Apply a signed stock delta, logging it with the supplied reason (or
    /// the generic manual-adjustment reason when none is given).
    pub fn adjust_stock(
        &self,
        id: &ProductId,
        delta: i64,
        reason: Option<&str>,
    ) -> InventoryResult<Product> {
        let mut inner = self.write();
        let current = inner
            .products
            .iter()
            .find(|p| p.id == *id)
            .ok_or(InventoryError::NotFound)?
            .stock;

        // Unconstrained wire input: the sum must not be computed unchecked.
        let candidate = current
            .checked_add(delta)
            .ok_or_else(|| InventoryError::validation("stock adjustment out of range"))?;
        if candidate < 0 {
            return Err(InventoryError::negative_stock(current, delta));
        }

        inner.update(id, ProductPatch::stock(candidate), reason, Utc::now())
    }

    /// Derive aggregate figures. Pure read; calling twice without mutation
    /// yields identical results.
    pub fn analytics(&self) -> Analytics {
        let inner = self.read();

        let mut categories = std::collections::BTreeMap::new();
        for product in &inner.products {
            let category = product.category.as_deref().unwrap_or("Uncategorized");
            *categories.entry(category.to_string()).or_insert(0) += 1;
        }

        Analytics {
            total_products: inner.products.len(),
            total_value: inner.products.iter().map(Product::stock_value).sum(),
            low_stock_count: inner
                .products
                .iter()
                .filter(|p| p.stock > 0 && p.stock <= p.min_stock)
                .count(),
            out_of_stock_count: inner.products.iter().filter(|p| p.stock == 0).count(),
            categories,
            recent_activity: inner
                .history
                .iter()
                .take(RECENT_ACTIVITY_LEN)
                .cloned()
                .collect(),
        }
    }

    /// Full or per-product history, newest first.
    pub fn stock_history(&self, product_id: Option<&ProductId>) -> Vec<StockHistoryEntry> {
        let inner = self.read();
        match product_id {
            Some(id) => inner
                .history
                .iter()
                .filter(|e| e.product_id == *id)
                .cloned()
                .collect(),
            None => inner.history.clone(),
        }
    }

    /// Export selection, in creation order.
    pub fn products_for_export(&self, options: &ExportOptions) -> Vec<Product> {
        let inner = self.read();
        inner
            .products
            .iter()
            .filter(|p| {
                if let Some(start) = options.start_date {
                    if p.created_at < start {
                        return false;
                    }
                }
                if let Some(end) = options.end_date {
                    if p.created_at > end {
                        return false;
                    }
                }
                if !options.include_out_of_stock && p.stock == 0 {
                    return false;
                }
                // Note: this comparison also drops out-of-stock products.
                if !options.include_low_stock && p.stock <= p.min_stock {
                    return false;
                }
                true
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::StockStatus;

    fn test_store() -> InventoryStore {
        InventoryStore::with_id_source(Box::new(SequentialIdSource::default()))
    }

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            sku: "W-1".to_string(),
            price: 10.0,
            stock: 5,
            min_stock: 10,
            description: Some("A test widget".to_string()),
            category: Some("Tools".to_string()),
        }
    }

    fn gadget() -> NewProduct {
        NewProduct {
            name: "gadget".to_string(),
            sku: "G-1".to_string(),
            price: 4.5,
            stock: 40,
            min_stock: 10,
            description: None,
            category: None,
        }
    }

    #[test]
    fn created_product_is_retrievable_with_one_initial_history_entry() {
        let store = test_store();
        let product = store.create_product(widget()).unwrap();

        assert_eq!(product.created_at, product.updated_at);
        assert_eq!(store.get_product(&product.id), Some(product.clone()));

        let history = store.stock_history(Some(&product.id));
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].previous_stock, 0);
        assert_eq!(history[0].change, 5);
        assert_eq!(history[0].new_stock, 5);
        assert_eq!(history[0].product_name, "Widget");
        assert_eq!(history[0].reason.as_deref(), Some("Initial stock"));

        // Retrievable by SKU through listing.
        let filter = ProductFilter {
            search: Some("w-1".to_string()),
            ..ProductFilter::default()
        };
        assert_eq!(store.list_products(&filter), vec![product]);
    }

    #[test]
    fn sequential_ids_are_deterministic() {
        let store = test_store();
        let a = store.create_product(widget()).unwrap();
        let b = store.create_product(gadget()).unwrap();
        assert_eq!(a.id, ProductId::from_uuid(Uuid::from_u128(1)));
        assert_eq!(b.id, ProductId::from_uuid(Uuid::from_u128(2)));
    }

    #[test]
    fn duplicate_sku_is_rejected_with_no_side_effects() {
        let store = test_store();
        store.create_product(widget()).unwrap();

        let duplicate = NewProduct {
            name: "Other".to_string(),
            ..widget()
        };
        assert_eq!(
            store.create_product(duplicate).unwrap_err(),
            InventoryError::DuplicateSku("W-1".to_string())
        );

        assert_eq!(store.list_products(&ProductFilter::default()).len(), 1);
        assert_eq!(store.stock_history(None).len(), 1);
    }

    #[test]
    fn update_refreshes_updated_at_without_stock_change() {
        let store = test_store();
        let product = store.create_product(widget()).unwrap();

        let updated = store
            .update_product(
                &product.id,
                ProductPatch {
                    price: Some(12.5),
                    ..ProductPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, 12.5);
        assert!(updated.updated_at >= product.updated_at);
        // No stock change, no new history entry.
        assert_eq!(store.stock_history(None).len(), 1);
    }

    #[test]
    fn update_stock_logs_manual_reason_by_delta_sign() {
        let store = test_store();
        let product = store.create_product(widget()).unwrap();

        store
            .update_product(&product.id, ProductPatch::stock(8))
            .unwrap();
        store
            .update_product(&product.id, ProductPatch::stock(2))
            .unwrap();

        let history = store.stock_history(Some(&product.id));
        assert_eq!(history.len(), 3);
        // Newest first.
        assert_eq!(history[0].change, -6);
        assert_eq!(history[0].reason.as_deref(), Some("Manual stock reduction"));
        assert_eq!(history[1].change, 3);
        assert_eq!(history[1].reason.as_deref(), Some("Manual stock addition"));
    }

    #[test]
    fn update_same_stock_value_logs_nothing() {
        let store = test_store();
        let product = store.create_product(widget()).unwrap();

        store
            .update_product(&product.id, ProductPatch::stock(5))
            .unwrap();
        assert_eq!(store.stock_history(None).len(), 1);
    }

    #[test]
    fn update_to_colliding_sku_is_rejected() {
        let store = test_store();
        store.create_product(widget()).unwrap();
        let other = store.create_product(gadget()).unwrap();

        let err = store
            .update_product(
                &other.id,
                ProductPatch {
                    sku: Some("W-1".to_string()),
                    ..ProductPatch::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, InventoryError::DuplicateSku("W-1".to_string()));

        // Re-asserting its own SKU is not a collision.
        store
            .update_product(
                &other.id,
                ProductPatch {
                    sku: Some("G-1".to_string()),
                    ..ProductPatch::default()
                },
            )
            .unwrap();
    }

    #[test]
    fn update_unknown_product_is_not_found() {
        let store = test_store();
        let err = store
            .update_product(&ProductId::new(), ProductPatch::stock(1))
            .unwrap_err();
        assert_eq!(err, InventoryError::NotFound);
    }

    #[test]
    fn rename_plus_stock_change_snapshots_the_new_name() {
        let store = test_store();
        let product = store.create_product(widget()).unwrap();

        store
            .update_product(
                &product.id,
                ProductPatch {
                    name: Some("Widget Pro".to_string()),
                    stock: Some(9),
                    ..ProductPatch::default()
                },
            )
            .unwrap();

        let history = store.stock_history(Some(&product.id));
        assert_eq!(history[0].product_name, "Widget Pro");
        // The earlier entry keeps its original snapshot.
        assert_eq!(history[1].product_name, "Widget");
    }

    #[test]
    fn adjust_stock_applies_delta_and_logs_exactly_one_entry() {
        let store = test_store();
        let product = store.create_product(widget()).unwrap();

        let updated = store
            .adjust_stock(&product.id, -3, Some("Order fulfilled"))
            .unwrap();
        assert_eq!(updated.stock, 2);
        assert!(updated.updated_at >= product.updated_at);

        let history = store.stock_history(Some(&product.id));
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].change, -3);
        assert_eq!(history[0].previous_stock, 5);
        assert_eq!(history[0].new_stock, 2);
        assert_eq!(history[0].reason.as_deref(), Some("Order fulfilled"));
    }

    #[test]
    fn adjust_stock_without_reason_falls_back_to_manual_reason() {
        let store = test_store();
        let product = store.create_product(widget()).unwrap();

        store.adjust_stock(&product.id, 4, None).unwrap();
        let history = store.stock_history(Some(&product.id));
        assert_eq!(history[0].reason.as_deref(), Some("Manual stock addition"));
    }

    #[test]
    fn negative_adjustment_is_rejected_in_full() {
        let store = test_store();
        let product = store.create_product(widget()).unwrap();
        let before = store.get_product(&product.id).unwrap();

        let err = store.adjust_stock(&product.id, -6, None).unwrap_err();
        assert_eq!(
            err,
            InventoryError::NegativeStock {
                current: 5,
                delta: -6
            }
        );

        // Stock, updated_at, and history all untouched.
        let after = store.get_product(&product.id).unwrap();
        assert_eq!(after, before);
        assert_eq!(store.stock_history(None).len(), 1);
    }

    #[test]
    fn overflowing_adjustment_is_rejected_in_full() {
        let store = test_store();
        let product = store.create_product(widget()).unwrap();

        // current + i64::MAX does not fit in i64.
        let err = store.adjust_stock(&product.id, i64::MAX, None).unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));

        // current + i64::MIN fits but is negative; still the stock error.
        let err = store.adjust_stock(&product.id, i64::MIN, None).unwrap_err();
        assert!(matches!(err, InventoryError::NegativeStock { .. }));

        // Stock and history untouched.
        assert_eq!(store.get_product(&product.id).unwrap().stock, 5);
        assert_eq!(store.stock_history(None).len(), 1);
    }

    #[test]
    fn adjust_unknown_product_is_not_found() {
        let store = test_store();
        assert_eq!(
            store.adjust_stock(&ProductId::new(), 1, None).unwrap_err(),
            InventoryError::NotFound
        );
    }

    #[test]
    fn delete_removes_product_but_keeps_history() {
        let store = test_store();
        let product = store.create_product(widget()).unwrap();
        store.adjust_stock(&product.id, 2, None).unwrap();

        assert!(store.delete_product(&product.id));
        assert_eq!(store.get_product(&product.id), None);
        assert!(!store.delete_product(&product.id));

        let history = store.stock_history(Some(&product.id));
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].product_name, "Widget");
    }

    #[test]
    fn list_filters_by_status() {
        let store = test_store();
        // widget: stock 5 <= min 10 → low; gadget: 40 > 10 → in stock.
        store.create_product(widget()).unwrap();
        store.create_product(gadget()).unwrap();
        let empty = store
            .create_product(NewProduct {
                name: "Empty".to_string(),
                sku: "E-1".to_string(),
                price: 1.0,
                stock: 0,
                min_stock: 3,
                description: None,
                category: None,
            })
            .unwrap();

        let low = store.list_products(&ProductFilter {
            status: Some(StockStatus::LowStock),
            ..ProductFilter::default()
        });
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].sku, "W-1");
        // Low-stock never includes stock == 0.
        assert!(low.iter().all(|p| p.stock > 0));

        let out = store.list_products(&ProductFilter {
            status: Some(StockStatus::OutOfStock),
            ..ProductFilter::default()
        });
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, empty.id);
    }

    #[test]
    fn list_search_is_case_insensitive_over_name_sku_description() {
        let store = test_store();
        store.create_product(widget()).unwrap();
        store.create_product(gadget()).unwrap();

        for needle in ["WIDGET", "w-1", "test widg"] {
            let found = store.list_products(&ProductFilter {
                search: Some(needle.to_string()),
                ..ProductFilter::default()
            });
            assert_eq!(found.len(), 1, "search {needle:?}");
            assert_eq!(found[0].sku, "W-1");
        }
    }

    #[test]
    fn list_filters_by_exact_category() {
        let store = test_store();
        store.create_product(widget()).unwrap();
        store.create_product(gadget()).unwrap();

        let tools = store.list_products(&ProductFilter {
            category: Some("Tools".to_string()),
            ..ProductFilter::default()
        });
        assert_eq!(tools.len(), 1);

        let none = store.list_products(&ProductFilter {
            category: Some("Tool".to_string()),
            ..ProductFilter::default()
        });
        assert!(none.is_empty());
    }

    #[test]
    fn list_sorts_name_case_insensitively_and_reverses_on_desc() {
        let store = test_store();
        store.create_product(widget()).unwrap(); // "Widget"
        store.create_product(gadget()).unwrap(); // "gadget"

        let asc = store.list_products(&ProductFilter {
            sort_by: Some(SortField::Name),
            ..ProductFilter::default()
        });
        assert_eq!(asc[0].name, "gadget");
        assert_eq!(asc[1].name, "Widget");

        let desc = store.list_products(&ProductFilter {
            sort_by: Some(SortField::Name),
            sort_order: SortOrder::Desc,
            ..ProductFilter::default()
        });
        assert_eq!(desc[0].name, "Widget");
    }

    #[test]
    fn list_sorts_by_price_and_stock() {
        let store = test_store();
        store.create_product(widget()).unwrap(); // price 10.0, stock 5
        store.create_product(gadget()).unwrap(); // price 4.5, stock 40

        let by_price = store.list_products(&ProductFilter {
            sort_by: Some(SortField::Price),
            ..ProductFilter::default()
        });
        assert_eq!(by_price[0].sku, "G-1");

        let by_stock = store.list_products(&ProductFilter {
            sort_by: Some(SortField::Stock),
            sort_order: SortOrder::Desc,
            ..ProductFilter::default()
        });
        assert_eq!(by_stock[0].sku, "G-1");
    }

    #[test]
    fn list_sorts_by_updated_at() {
        let store = test_store();
        let first = store.create_product(widget()).unwrap();
        store.create_product(gadget()).unwrap();
        // Touch the older product so it becomes most recently updated.
        store
            .update_product(
                &first.id,
                ProductPatch {
                    price: Some(11.0),
                    ..ProductPatch::default()
                },
            )
            .unwrap();

        let listed = store.list_products(&ProductFilter {
            sort_by: Some(SortField::UpdatedAt),
            sort_order: SortOrder::Desc,
            ..ProductFilter::default()
        });
        assert_eq!(listed[0].id, first.id);
    }

    #[test]
    fn list_without_sort_keeps_insertion_order_and_never_mutates() {
        let store = test_store();
        let a = store.create_product(widget()).unwrap();
        let b = store.create_product(gadget()).unwrap();

        let sorted = store.list_products(&ProductFilter {
            sort_by: Some(SortField::Price),
            ..ProductFilter::default()
        });
        assert_eq!(sorted[0].id, b.id);

        // The underlying collection is untouched by the sorted listing.
        let plain = store.list_products(&ProductFilter::default());
        assert_eq!(plain[0].id, a.id);
        assert_eq!(plain[1].id, b.id);
    }

    #[test]
    fn analytics_totals_and_categories() {
        let store = test_store();
        store.create_product(widget()).unwrap(); // 10.0 × 5, Tools, low
        store.create_product(gadget()).unwrap(); // 4.5 × 40, no category
        store
            .create_product(NewProduct {
                name: "Empty".to_string(),
                sku: "E-1".to_string(),
                price: 99.0,
                stock: 0,
                min_stock: 3,
                description: None,
                category: Some("Tools".to_string()),
            })
            .unwrap();

        let analytics = store.analytics();
        assert_eq!(analytics.total_products, 3);
        assert_eq!(analytics.total_value, 10.0 * 5.0 + 4.5 * 40.0);
        assert_eq!(analytics.low_stock_count, 1);
        assert_eq!(analytics.out_of_stock_count, 1);
        assert_eq!(analytics.categories.get("Tools"), Some(&2));
        assert_eq!(analytics.categories.get("Uncategorized"), Some(&1));
        assert_eq!(analytics.recent_activity.len(), 3);

        // Idempotent: a second read is identical.
        assert_eq!(store.analytics(), analytics);
    }

    #[test]
    fn analytics_recent_activity_is_ten_newest_entries() {
        let store = test_store();
        let product = store.create_product(gadget()).unwrap();
        for _ in 0..12 {
            store.adjust_stock(&product.id, 1, None).unwrap();
        }

        let analytics = store.analytics();
        assert_eq!(analytics.recent_activity.len(), 10);
        // Newest first: the last adjustment leads.
        assert_eq!(analytics.recent_activity[0].new_stock, 52);
        assert!(
            analytics
                .recent_activity
                .windows(2)
                .all(|w| w[0].id > w[1].id)
        );
    }

    #[test]
    fn low_stock_becomes_out_of_stock_after_draining_adjustment() {
        let store = test_store();
        store.create_product(gadget()).unwrap();
        let baseline = store.analytics();

        let product = store.create_product(widget()).unwrap();
        let after_create = store.analytics();
        assert_eq!(after_create.low_stock_count, baseline.low_stock_count + 1);
        assert_eq!(after_create.out_of_stock_count, baseline.out_of_stock_count);

        store.adjust_stock(&product.id, -5, None).unwrap();
        let drained = store.analytics();
        assert_eq!(drained.low_stock_count, baseline.low_stock_count);
        assert_eq!(
            drained.out_of_stock_count,
            baseline.out_of_stock_count + 1
        );
    }

    #[test]
    fn history_is_capped_at_1000_evicting_oldest() {
        let store = test_store();
        let product = store.create_product(gadget()).unwrap();

        // 1 creation entry + 1100 adjustments.
        for _ in 0..550 {
            store.adjust_stock(&product.id, 1, None).unwrap();
            store.adjust_stock(&product.id, -1, None).unwrap();
        }

        let history = store.stock_history(None);
        assert_eq!(history.len(), 1000);
        // The initial-stock entry (id 1) was evicted; newest entry leads.
        assert_eq!(history.last().unwrap().id, HistoryId(102));
        assert_eq!(history[0].id, HistoryId(1101));
        assert!(
            history
                .iter()
                .all(|e| e.reason.as_deref() != Some("Initial stock"))
        );
    }

    #[test]
    fn export_filters_by_inclusive_creation_range() {
        let store = test_store();
        let product = store.create_product(widget()).unwrap();

        let all = store.products_for_export(&ExportOptions {
            start_date: Some(product.created_at),
            end_date: Some(product.created_at),
            ..ExportOptions::default()
        });
        assert_eq!(all.len(), 1);

        let before = store.products_for_export(&ExportOptions {
            end_date: Some(product.created_at - chrono::Duration::seconds(1)),
            ..ExportOptions::default()
        });
        assert!(before.is_empty());

        let after = store.products_for_export(&ExportOptions {
            start_date: Some(product.created_at + chrono::Duration::seconds(1)),
            ..ExportOptions::default()
        });
        assert!(after.is_empty());
    }

    #[test]
    fn export_exclusion_flags() {
        let store = test_store();
        store.create_product(widget()).unwrap(); // low (5 <= 10)
        store.create_product(gadget()).unwrap(); // in stock
        store
            .create_product(NewProduct {
                name: "Empty".to_string(),
                sku: "E-1".to_string(),
                price: 1.0,
                stock: 0,
                min_stock: 3,
                description: None,
                category: None,
            })
            .unwrap();

        let no_out = store.products_for_export(&ExportOptions {
            include_out_of_stock: false,
            ..ExportOptions::default()
        });
        assert_eq!(
            no_out.iter().map(|p| p.sku.as_str()).collect::<Vec<_>>(),
            vec!["W-1", "G-1"]
        );

        // include_low_stock=false drops stock <= min_stock, which also drops
        // out-of-stock regardless of include_out_of_stock.
        let no_low = store.products_for_export(&ExportOptions {
            include_low_stock: false,
            ..ExportOptions::default()
        });
        assert_eq!(
            no_low.iter().map(|p| p.sku.as_str()).collect::<Vec<_>>(),
            vec!["G-1"]
        );
    }

    #[test]
    fn export_preserves_creation_order() {
        let store = test_store();
        let a = store.create_product(widget()).unwrap();
        let b = store.create_product(gadget()).unwrap();

        let exported = store.products_for_export(&ExportOptions::default());
        assert_eq!(
            exported.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![a.id, b.id]
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: stock never goes negative under any adjustment
            /// sequence, and the final stock equals the initial stock plus
            /// the accepted deltas.
            #[test]
            fn stock_never_negative(
                initial in 0i64..100,
                deltas in proptest::collection::vec(-50i64..50, 1..40),
            ) {
                let store = test_store();
                let product = store.create_product(NewProduct {
                    name: "P".to_string(),
                    sku: "P-1".to_string(),
                    price: 1.0,
                    stock: initial,
                    min_stock: 5,
                    description: None,
                    category: None,
                }).unwrap();

                let mut expected = initial;
                for delta in deltas {
                    match store.adjust_stock(&product.id, delta, None) {
                        Ok(updated) => {
                            expected += delta;
                            prop_assert_eq!(updated.stock, expected);
                        }
                        Err(InventoryError::NegativeStock { current, delta: d }) => {
                            prop_assert_eq!(current, expected);
                            prop_assert!(expected + d < 0);
                        }
                        Err(other) => prop_assert!(false, "unexpected error: {other}"),
                    }
                    let live = store.get_product(&product.id).unwrap();
                    prop_assert!(live.stock >= 0);
                    prop_assert_eq!(live.stock, expected);
                }
            }

            /// Property: every accepted adjustment appends exactly one entry
            /// whose before/after arithmetic holds, and entries stay
            /// newest-first.
            #[test]
            fn history_entries_are_consistent(
                deltas in proptest::collection::vec(-20i64..40, 1..30),
            ) {
                let store = test_store();
                let product = store.create_product(NewProduct {
                    name: "P".to_string(),
                    sku: "P-1".to_string(),
                    price: 1.0,
                    stock: 30,
                    min_stock: 5,
                    description: None,
                    category: None,
                }).unwrap();

                let mut accepted = 1; // creation entry
                for delta in deltas {
                    if store.adjust_stock(&product.id, delta, None).is_ok() {
                        accepted += 1;
                    }
                    prop_assert_eq!(store.stock_history(None).len(), accepted);
                }

                let history = store.stock_history(None);
                for entry in &history {
                    prop_assert_eq!(entry.previous_stock + entry.change, entry.new_stock);
                    prop_assert!(entry.new_stock >= 0);
                }
                prop_assert!(history.windows(2).all(|w| w[0].id > w[1].id));
            }

            /// Property: analytics total value always equals the sum over
            /// current products of price × stock.
            #[test]
            fn total_value_matches_sum(
                stocks in proptest::collection::vec((0i64..200, 0u32..10_000), 0..12),
            ) {
                let store = test_store();
                for (i, (stock, cents)) in stocks.iter().enumerate() {
                    store.create_product(NewProduct {
                        name: format!("P{i}"),
                        sku: format!("P-{i}"),
                        price: f64::from(*cents) / 100.0,
                        stock: *stock,
                        min_stock: 5,
                        description: None,
                        category: None,
                    }).unwrap();
                }

                let expected: f64 = store
                    .list_products(&ProductFilter::default())
                    .iter()
                    .map(|p| p.price * p.stock as f64)
                    .sum();
                prop_assert_eq!(store.analytics().total_value, expected);
            }
        }
    }
}
