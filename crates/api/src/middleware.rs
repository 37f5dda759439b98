//! Request-level middleware.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Log one line per handled request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    tracing::info!(%method, %uri, status = %response.status(), "request");
    response
}
