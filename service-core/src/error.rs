use thiserror::Error;

/// Infrastructure errors raised while configuring or running a service.
///
/// Request-level failures are rendered by the service itself; this type covers
/// what can go wrong before the first request is accepted or after the listener dies.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl AppError {
    pub fn config(msg: impl std::fmt::Display) -> Self {
        AppError::ConfigError(anyhow::anyhow!("{}", msg))
    }
}
