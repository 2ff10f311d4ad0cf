//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Probe payload. Name and version come from crate metadata so a deploy can
/// be confirmed from the load balancer alone.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

fn probe(status: &'static str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status,
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness: the process is up and serving.
pub async fn health_check() -> Json<HealthResponse> {
    probe("healthy")
}

/// Readiness: liveness plus a round trip to the database.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    sqlx::query("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok(probe("ready"))
}
