use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_core::ProductId;
use stockroom_inventory::InventoryStore;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(get_history))
}

pub async fn get_history(
    Extension(store): Extension<Arc<InventoryStore>>,
    Query(query): Query<dto::HistoryQuery>,
) -> axum::response::Response {
    let product_id: Option<ProductId> = match query.product_id.as_deref() {
        Some(raw) => match raw.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_id",
                    "invalid product id",
                );
            }
        },
        None => None,
    };

    let mut history = store.stock_history(product_id.as_ref());
    if let Some(limit) = query.limit {
        history.truncate(limit);
    }

    (StatusCode::OK, Json(history)).into_response()
}
