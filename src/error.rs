//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;

use crate::models::error::ErrorResponse;

/// The errors that may occur while serving listings, reports and imports.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The month was missing, not a number, or outside 1 to 12.
    #[error("invalid month \"{0}\": expected an integer from 1 to 12")]
    InvalidMonth(String),

    /// A page or limit query parameter was not a positive integer.
    #[error("invalid {field} \"{value}\": expected a positive integer")]
    InvalidPagination { field: &'static str, value: String },

    /// The record store failed while running a listing or report query.
    ///
    /// Queries are never retried. The inner error should only be logged on the
    /// server; clients get a generic message.
    #[error("report query failed: {0}")]
    ReportQueryFailed(#[source] DbErr),

    /// The seed data could not be downloaded, validated or stored.
    #[error("import failed: {reason}")]
    ImportFailed { reason: String, upstream: bool },
}

impl Error {
    /// An import failure caused by the remote seed source.
    pub fn upstream_import(reason: impl Into<String>) -> Self {
        Self::ImportFailed {
            reason: reason.into(),
            upstream: true,
        }
    }

    /// An import failure caused by the data or the local store.
    pub fn local_import(reason: impl Into<String>) -> Self {
        Self::ImportFailed {
            reason: reason.into(),
            upstream: false,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::InvalidPagination { .. } => StatusCode::BAD_REQUEST,
            Error::ReportQueryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::ImportFailed { upstream: true, .. } => StatusCode::BAD_GATEWAY,
            Error::ImportFailed { upstream: false, .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for Error {
    fn from(value: DbErr) -> Self {
        Error::ReportQueryFailed(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            Error::ReportQueryFailed(e) => {
                tracing::error!(error = %e, "Record store query failed");
                "Error fetching transactions".to_string()
            }
            Error::ImportFailed { reason, .. } => {
                tracing::error!(error = %reason, "Database initialization failed");
                format!("Error initializing database: {}", reason)
            }
            other => {
                tracing::warn!(error = %other, "Rejected request");
                other.to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
