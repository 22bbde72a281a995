//! Application configuration management.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Balance engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Report rendering configuration.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Balance engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Balances within this many cents of zero count as settled.
    #[serde(default = "default_tolerance_cents")]
    pub tolerance_cents: i64,
    /// Reject balance sets whose debits and credits do not cancel out.
    #[serde(default)]
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance_cents: default_tolerance_cents(),
            strict: false,
        }
    }
}

fn default_tolerance_cents() -> i64 {
    1
}

/// Report rendering configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    /// Currency used when a group snapshot does not name one.
    #[serde(default)]
    pub currency: Currency,
    /// Output format for reports.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(AppError::Validation(format!("Unknown output format: {s}"))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "divvy=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DIVVY").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
