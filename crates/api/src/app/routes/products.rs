use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use stockroom_core::ProductId;
use stockroom_inventory::{InventoryStore, ProductFilter};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/adjust", post(adjust_stock))
}

pub async fn list_products(
    Extension(store): Extension<Arc<InventoryStore>>,
    Query(query): Query<dto::ListProductsQuery>,
) -> axum::response::Response {
    let mut filter = ProductFilter {
        search: query.search,
        category: query.category,
        ..ProductFilter::default()
    };

    if let Some(status) = query.status.as_deref() {
        filter.status = match errors::parse_status_filter(status) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
    }
    if let Some(field) = query.sort_by.as_deref() {
        filter.sort_by = match errors::parse_sort_field(field) {
            Ok(v) => Some(v),
            Err(resp) => return resp,
        };
    }
    if let Some(order) = query.sort_order.as_deref() {
        filter.sort_order = match errors::parse_sort_order(order) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
    }

    (StatusCode::OK, Json(store.list_products(&filter))).into_response()
}

pub async fn get_product(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid product id",
            );
        }
    };

    match store.get_product(&id) {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

pub async fn create_product(
    Extension(store): Extension<Arc<InventoryStore>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    if let Err(resp) = body.validate() {
        return resp;
    }

    match store.create_product(body.into_new_product()) {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid product id",
            );
        }
    };

    if let Err(resp) = body.validate() {
        return resp;
    }

    match store.update_product(&id, body.into_patch()) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid product id",
            );
        }
    };

    if store.delete_product(&id) {
        (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Product deleted successfully" })),
        )
            .into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
    }
}

pub async fn adjust_stock(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AdjustStockRequest>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid product id",
            );
        }
    };

    match store.adjust_stock(&id, body.delta, body.reason.as_deref()) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
