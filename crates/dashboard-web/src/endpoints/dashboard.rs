//! `GET /`: the HTML dashboard.

use axum::extract::State;
use axum::response::Html;
use dashboard_core::error::RenderError;
use dashboard_core::models::DashboardMetrics;
use dashboard_data::analysis::dashboard_metrics;

use crate::context::DashboardContext;
use crate::view;

/// Run the pipeline and hand the tagged result to the view.
///
/// Always answers with a page; pipeline failures are shown inline.
pub async fn index(State(ctx): State<DashboardContext>) -> Html<String> {
    match compute(&ctx).await {
        Ok(metrics) => Html(view::render_dashboard(&metrics)),
        Err(err) => {
            tracing::error!(error = %err, source = %ctx.source().display(), "dashboard render failed");
            Html(view::render_error(&err.to_string()))
        }
    }
}

/// Load and aggregate on the blocking pool.
pub async fn compute(ctx: &DashboardContext) -> Result<DashboardMetrics, RenderError> {
    ctx.run(dashboard_metrics)
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
}
