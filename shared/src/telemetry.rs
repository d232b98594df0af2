use anyhow::{anyhow, Result};
use std::env;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{parse_or, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub log_format: LogFormat,
    pub default_filter: String,
}

impl TelemetryConfig {
    /// Reads `LOG_FORMAT` (text when unset). Unknown values are rejected.
    pub fn from_env(service_name: &str) -> Result<Self, ConfigError> {
        Self::with_log_format(service_name, env::var("LOG_FORMAT").ok())
    }

    pub fn with_log_format(
        service_name: &str,
        log_format: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            service_name: service_name.to_string(),
            log_format: parse_or("LOG_FORMAT", log_format, LogFormat::Text)?,
            default_filter: "info".to_string(),
        })
    }
}

pub fn init_telemetry(config: TelemetryConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format {
        LogFormat::Json => builder
            .json()
            .with_current_span(true)
            .try_init()
            .map_err(|e| anyhow!("Failed to initialize tracing: {}", e))?,
        LogFormat::Text => builder
            .try_init()
            .map_err(|e| anyhow!("Failed to initialize tracing: {}", e))?,
    }

    info!(
        service = %config.service_name,
        format = ?config.log_format,
        "Telemetry initialized"
    );
    Ok(())
}
