pub mod access_log;
pub mod cors;
pub mod metrics;
pub mod security_headers;
pub mod tracing;
