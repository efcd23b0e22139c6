//! `GET /download/:kind`: CSV reports.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use dashboard_core::error::ExportError;
use dashboard_data::export::{export, ExportKind, INVALID_EXPORT_MESSAGE};

use crate::context::DashboardContext;
use crate::error::ApiError;

/// Serve one report as an attachment.
///
/// An unknown `kind` gets the plain invalid-type message with a 200 status.
pub async fn download(
    State(ctx): State<DashboardContext>,
    Path(kind): Path<String>,
) -> Result<Response, ApiError> {
    let kind: ExportKind = match kind.parse() {
        Ok(kind) => kind,
        Err(err) => {
            tracing::warn!(error = %err, "rejected download request");
            return Ok(INVALID_EXPORT_MESSAGE.into_response());
        }
    };

    let payload = ctx
        .run(move |source, options| export(source, options, kind))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))??;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", payload.filename),
        ),
    ];

    Ok((headers, payload.body).into_response())
}
