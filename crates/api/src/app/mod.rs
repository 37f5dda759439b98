//! HTTP API application wiring (Axum router + store wiring).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and boundary-level input checks
//! - `errors.rs`: consistent error responses and query-parameter parsing
//! - `seed.rs`: sample-catalog bootstrap (dev/demo fixture, not core contract)

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use stockroom_inventory::InventoryStore;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod seed;

/// Build the full HTTP router with a freshly seeded store (used by `main.rs`).
pub fn build_app() -> Router {
    let store = Arc::new(InventoryStore::new());
    seed::seed_sample_catalog(&store);
    build_app_with_store(store)
}

/// Build the router around an injected store (tests construct their own).
pub fn build_app_with_store(store: Arc<InventoryStore>) -> Router {
    Router::new()
        .merge(routes::router())
        .layer(Extension(store))
        .layer(axum::middleware::from_fn(crate::middleware::log_requests))
        .layer(ServiceBuilder::new())
}
