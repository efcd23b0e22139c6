//! Server lifecycle: bind, serve until Ctrl+C.

use tokio::net::TcpListener;
use tracing::info;

use crate::context::DashboardContext;
use crate::router::dashboard_router;

/// Bind to `addr` and serve the dashboard until a shutdown signal arrives.
pub async fn serve(addr: &str, ctx: DashboardContext) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(
        "Dashboard listening on http://{} (source: {})",
        listener.local_addr()?,
        ctx.source().display()
    );

    axum::serve(listener, dashboard_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
