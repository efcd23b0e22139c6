//! Route table for the dashboard server.

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::context::DashboardContext;
use crate::endpoints;

/// Build the dashboard router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn dashboard_router(ctx: DashboardContext) -> Router {
    Router::new()
        .route("/", get(endpoints::dashboard::index))
        .route("/download/:kind", get(endpoints::download::download))
        .route("/api/metrics", get(endpoints::metrics::metrics))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
}
