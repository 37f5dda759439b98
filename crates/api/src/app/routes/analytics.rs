use std::sync::Arc;

use axum::{Json, Router, extract::Extension, routing::get};

use stockroom_inventory::InventoryStore;

pub fn router() -> Router {
    Router::new().route("/", get(get_analytics))
}

pub async fn get_analytics(
    Extension(store): Extension<Arc<InventoryStore>>,
) -> Json<stockroom_inventory::Analytics> {
    Json(store.analytics())
}
