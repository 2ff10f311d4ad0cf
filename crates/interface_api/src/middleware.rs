//! Request audit trail
//!
//! Every API call the registration desk makes is logged with its outcome and
//! latency, so payment disputes can be matched against what the office
//! actually did and when.

use std::time::Instant;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use tracing::{info, warn};

use crate::AppState;

/// Logs method, path, status, and latency for every request.
///
/// Client and server errors log at `warn` so duplicate rolls and unknown
/// students stay visible without raising the global log level.
pub async fn audit_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if response.status().is_client_error() || response.status().is_server_error() {
        warn!(%method, path, status, elapsed_ms, "request failed");
    } else {
        info!(%method, path, status, elapsed_ms, "request completed");
    }

    response
}
