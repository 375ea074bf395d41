use crate::error::ApiError;
use crate::services::MemorySnapshot;
use crate::startup::AppState;
use crate::SERVICE_NAME;
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use service_core::utils::iso_timestamp;

pub const FEATURES: [&str; 3] = ["health-check", "basic-api", "logging"];

pub async fn api_overview() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "message": format!("{} API is up and running", SERVICE_NAME),
        "timestamp": iso_timestamp(),
        "data": {
            "status": "operational",
            "features": FEATURES,
        }
    }))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub status: &'static str,
    /// Seconds since the application was built.
    pub uptime: f64,
    pub memory: MemorySnapshot,
    pub timestamp: String,
}

/// Connectivity probe reporting uptime and memory of the running process.
pub async fn api_status(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    let memory = state.process.memory_snapshot()?;

    Ok(Json(StatusResponse {
        service: SERVICE_NAME,
        status: "running",
        uptime: state.uptime(),
        memory,
        timestamp: iso_timestamp(),
    }))
}
