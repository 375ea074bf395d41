use crate::error::AppError;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Installs the global Prometheus recorder and serves the scrape endpoint on its
/// own listener, keeping `/metrics` out of the service's route table.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(port: u16) -> Result<SocketAddr, AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| AppError::config(format!("Failed to install Prometheus exporter: {}", e)))?;

    Ok(addr)
}
