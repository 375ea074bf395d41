use service_core::error::AppError;
use service_core::observability::{init_metrics, init_tracing, shutdown_tracing};
use user_service::{config::UserServiceConfig, Application, SERVICE_NAME, SERVICE_VERSION};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = UserServiceConfig::from_env()?;

    init_tracing(
        SERVICE_NAME,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    if let Some(metrics_port) = config.metrics_port {
        let addr = init_metrics(metrics_port)?;
        tracing::info!(address = %addr, "Prometheus exporter listening");
    }

    tracing::info!(
        service = SERVICE_NAME,
        version = SERVICE_VERSION,
        environment = %config.environment,
        "Starting user service"
    );

    if config.is_production() && config.allows_any_origin() {
        tracing::warn!("Wildcard CORS origin is enabled in production");
    }

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    tracing::info!("Service shutdown complete");
    shutdown_tracing();
    Ok(())
}
