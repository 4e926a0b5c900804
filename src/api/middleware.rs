use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::debug;

/// Log method, path, status and latency of every request.
pub async fn record_request(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    debug!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Handled request"
    );
    response
}
