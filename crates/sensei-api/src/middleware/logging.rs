use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Logs method, uri, status and latency of every request.
///
/// For `/ask` the latency covers the time to the response head, not the
/// whole event stream.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        "Request processed"
    );

    response
}
