use crate::{API_PATH, HEALTH_PATH, SERVICE_NAME, SERVICE_VERSION, STATUS_PATH};
use axum::Json;
use serde_json::{json, Value};

pub async fn service_info() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "message": format!("{} microservice of the Fature platform", SERVICE_NAME),
        "version": SERVICE_VERSION,
        "endpoints": {
            "health": HEALTH_PATH,
            "api": API_PATH,
            "status": STATUS_PATH,
        }
    }))
}
