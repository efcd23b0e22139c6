//! Error-to-response mapping for the JSON and download endpoints.
//!
//! The HTML dashboard never uses this: it renders failures inline.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dashboard_core::error::{ExportError, RenderError};
use serde::Serialize;

/// Body of a failed JSON request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler-level failures.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Metrics(#[from] RenderError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        match self {
            ApiError::Metrics(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            )
                .into_response(),
            ApiError::Export(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}
