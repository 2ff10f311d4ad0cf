//! Fund handlers

use axum::{extract::State, Json};
use tracing::instrument;

use domain_fund::FundStoreExt;

use crate::dto::fund::FundResponse;
use crate::error::ApiError;
use crate::AppState;

/// Returns the running fund total
#[instrument(skip(state))]
pub async fn total_fund(State(state): State<AppState>) -> Result<Json<FundResponse>, ApiError> {
    let total = state.fund.total().await?;
    Ok(Json(total.into()))
}
