use crate::startup::AppState;
use crate::{SERVICE_NAME, SERVICE_VERSION};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::utils::iso_timestamp;

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "timestamp": iso_timestamp(),
            "version": SERVICE_VERSION,
            "environment": state.config.environment,
        })),
    )
}
