//! HTTP handlers for the user service.

pub mod api;
pub mod fallback;
pub mod health;
pub mod root;

pub use api::{api_overview, api_status};
pub use fallback::not_found;
pub use health::health_check;
pub use root::service_info;
