use axum::{Router, routing::get};

pub mod analytics;
pub mod export;
pub mod history;
pub mod products;
pub mod system;

/// Router for all endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/api/health", get(system::health))
        .nest("/api/products", products::router())
        .nest("/api/analytics", analytics::router())
        .nest("/api/history", history::router())
        .nest("/api/export", export::router())
}
