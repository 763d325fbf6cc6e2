//! Request logging middleware
//!
//! Emits one `HTTP_REQUEST` line per request with method, path, status and
//! elapsed time.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

use crate::observability::Logger;

pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = started.elapsed().as_millis().to_string();
    let fields = [
        ("method", method.as_str()),
        ("path", path.as_str()),
        ("status", status.as_str()),
        ("elapsed_ms", elapsed.as_str()),
    ];

    if status.is_server_error() {
        Logger::warn("HTTP_REQUEST", &fields);
    } else {
        Logger::info("HTTP_REQUEST", &fields);
    }

    response
}
