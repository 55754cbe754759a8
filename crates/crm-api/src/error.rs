//! Error types for the report API.
//!
//! [`ApiError`] converts into an Axum response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! failure is reported to the client as an opaque 500; the cause is only
//! written to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crm_db::DbError;

/// Message returned to clients for any server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Errors that can occur while serving a report.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The repository could not produce the records.
    #[error("store error: {0}")]
    Store(#[from] DbError),
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Store(e) => {
                tracing::error!(
                    error = %e,
                    unavailable = e.is_unavailable(),
                    decode = e.is_decode(),
                    "Report query failed"
                );
            }
        }

        let body = serde_json::json!({
            "error": INTERNAL_ERROR_MESSAGE,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
