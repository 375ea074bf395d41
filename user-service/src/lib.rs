pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};

#[global_allocator]
static GLOBAL: services::CountingAllocator = services::CountingAllocator;

/// Identifier embedded in every response body.
pub const SERVICE_NAME: &str = "user-service";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HEALTH_PATH: &str = "/health";
pub const API_PATH: &str = "/api/v1/user-service";
pub const STATUS_PATH: &str = "/api/v1/user-service/status";
