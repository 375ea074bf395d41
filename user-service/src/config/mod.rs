use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Clone, Deserialize)]
pub struct UserServiceConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    /// Deployment environment reported by `/health`.
    pub environment: String,
    pub log_level: String,
    pub allowed_origins: Vec<String>,
    pub otlp_endpoint: Option<String>,
    pub metrics_port: Option<u16>,
}

impl UserServiceConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let config = UserServiceConfig {
            common: common_config,
            environment: get_env("APP_ENV")
                .or_else(|| get_env("NODE_ENV"))
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            log_level: get_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            allowed_origins: get_env("ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            otlp_endpoint: get_env("OTLP_ENDPOINT"),
            metrics_port: get_env("METRICS_PORT")
                .map(|port| {
                    port.parse().map_err(|e: std::num::ParseIntError| {
                        AppError::config(format!("METRICS_PORT is invalid: {}", e))
                    })
                })
                .transpose()?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        matches!(
            self.environment.to_lowercase().as_str(),
            "production" | "prod"
        )
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.common.port == 0 {
            return Err(AppError::config("PORT must be greater than 0"));
        }

        if self.metrics_port == Some(self.common.port) {
            return Err(AppError::config("METRICS_PORT must differ from PORT"));
        }

        Ok(())
    }
}

/// Reads a variable, treating empty values as unset.
fn get_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
