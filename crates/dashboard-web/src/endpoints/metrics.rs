//! `GET /api/metrics`: dashboard metrics as JSON.

use axum::extract::State;
use axum::Json;
use dashboard_core::models::DashboardMetrics;

use crate::context::DashboardContext;
use crate::endpoints::dashboard::compute;
use crate::error::ApiError;

pub async fn metrics(
    State(ctx): State<DashboardContext>,
) -> Result<Json<DashboardMetrics>, ApiError> {
    Ok(Json(compute(&ctx).await?))
}
