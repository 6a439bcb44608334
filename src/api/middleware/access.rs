//! Access logging middleware.
//!
//! Logs every API request with method, path, response status, and
//! elapsed time. Layered around the whole router, so requests that
//! match no route still produce a log line.

use std::time::Instant;

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Log one line per request.
pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis();
    tracing::info!(%method, %path, status, elapsed_ms, "request");

    response
}
