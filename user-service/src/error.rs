use crate::SERVICE_NAME;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use service_core::utils::iso_timestamp;
use std::any::Any;
use thiserror::Error;

/// Request-level failures of the user service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {path}")]
    NotFound { path: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub service: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub timestamp: String,
}

impl ErrorResponse {
    fn internal() -> Self {
        Self {
            error: "Internal Server Error",
            service: SERVICE_NAME,
            path: None,
            timestamp: iso_timestamp(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound { path } => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Not Found",
                    service: SERVICE_NAME,
                    path: Some(path),
                    timestamp: iso_timestamp(),
                }),
            )
                .into_response(),
            ApiError::Internal(err) => {
                // Details stay in the logs; clients only get the generic payload
                tracing::error!(error = ?err, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::internal())).into_response()
            }
        }
    }
}

/// Turns a handler panic caught by `CatchPanicLayer` into the 500 payload.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::internal())).into_response()
}
