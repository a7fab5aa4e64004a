//! Configuration loading and validation.
//!
//! Settings are read from a TOML file. Every field has a default, so running
//! without a config file works out of the box.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Where the coefficient sheets live.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

/// How solved values are read back for reporting.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Flows smaller than this are treated as zero and not printed.
    #[serde(default = "default_flow_epsilon")]
    pub flow_epsilon: f64,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_flow_epsilon() -> f64 {
    1e-8
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            flow_epsilon: default_flow_epsilon(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            data: DataConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.format",
                    reason: format!("expected 'pretty' or 'json', got '{other}'"),
                }
                .into())
            }
        }
        if !self.report.flow_epsilon.is_finite() || self.report.flow_epsilon < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "report.flow_epsilon",
                reason: format!("must be a non-negative number, got {}", self.report.flow_epsilon),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_sections_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.report.flow_epsilon, 1e-8);
    }

    #[test]
    fn parses_full_config() {
        let toml = r#"
            [logging]
            level = "debug"
            format = "json"

            [data]
            dir = "fixtures"

            [report]
            flow_epsilon = 0.001
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.data.dir, PathBuf::from("fixtures"));
        assert_eq!(config.report.flow_epsilon, 0.001);
    }

    #[test]
    fn rejects_unknown_log_format() {
        let config: Config = toml::from_str("[logging]\nformat = \"xml\"").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_epsilon() {
        let config: Config = toml::from_str("[report]\nflow_epsilon = -1.0").unwrap();
        assert!(config.validate().is_err());
    }
}
