use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::MaintenanceBody;

/// Source of an internal failure. Kept for the server-side log only.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const MAINTENANCE_ERROR: &str = "Service temporarily unavailable";
pub const MAINTENANCE_MESSAGE: &str = "Blog categories are being migrated. Please check back soon.";

/// ApiError
///
/// Everything a handler can fail with. Only three outward statuses exist: 401 for a
/// missing admin, 500 for any internal failure, and 503 for routes parked during the
/// migration. Internal failures are logged here, at the point they become a response,
/// and the caller only ever sees the fixed `message`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    /// 500 with `{ error }`.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: BoxError,
    },

    /// 500 with `{ success: false, error }`, for routes whose success body is an envelope.
    #[error("{message}")]
    Envelope {
        message: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Service temporarily unavailable")]
    Maintenance,
}

impl ApiError {
    pub fn internal<E>(message: &'static str) -> impl FnOnce(E) -> ApiError
    where
        E: Into<BoxError>,
    {
        move |source| ApiError::Internal {
            message,
            source: source.into(),
        }
    }

    pub fn envelope<E>(message: &'static str) -> impl FnOnce(E) -> ApiError
    where
        E: Into<BoxError>,
    {
        move |source| ApiError::Envelope {
            message,
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal { .. } | ApiError::Envelope { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Maintenance => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

pub fn maintenance_body() -> MaintenanceBody {
    MaintenanceBody {
        error: MAINTENANCE_ERROR.to_string(),
        message: MAINTENANCE_MESSAGE.to_string(),
        categories: Vec::new(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Unauthorized => (status, Json(json!({ "error": "Unauthorized" }))).into_response(),
            ApiError::Internal { message, source } => {
                tracing::error!(error = %source, "{message}");
                (status, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Envelope { message, source } => {
                tracing::error!(error = %source, "{message}");
                (status, Json(json!({ "success": false, "error": message }))).into_response()
            }
            ApiError::Maintenance => (status, Json(maintenance_body())).into_response(),
        }
    }
}
