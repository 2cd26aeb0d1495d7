//! Configuration loading from TOML files.
//!
//! Every section has defaults tuned for the stock InfluxDB + Grafana stack,
//! so the tool runs without a config file at all. A file only needs to name
//! the fields it overrides.

use serde::Deserialize;
use std::path::Path;
use url::Url;

use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Host the health probes target. Replaces the old ambient
    /// remote-host environment override: if the stack runs elsewhere,
    /// say so here.
    pub host: String,
    pub compose: ComposeConfig,
    #[serde(rename = "service")]
    pub services: Vec<ServiceConfig>,
    pub readiness: ReadinessConfig,
    pub importer: ImporterConfig,
    pub logging: LoggingConfig,
}

/// How to drive the container-orchestration tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    /// Orchestration binary.
    pub bin: String,
    /// Compose manifest. Opaque to this tool.
    pub file: String,
    /// Optional compose project name (`-p`).
    pub project: Option<String>,
    /// File the bring-up command's combined stdout/stderr is redirected to.
    pub log_file: String,
}

/// One managed service and its health endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub name: String,
    pub port: u16,
    pub health_path: String,
}

impl ServiceConfig {
    /// Health endpoint URL for this service on `host`.
    #[must_use]
    pub fn health_url(&self, host: &str) -> String {
        format!("http://{}:{}{}", host, self.port, self.health_path)
    }
}

/// Readiness-wait cadence and (optional) deadline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadinessConfig {
    /// Seconds between failed probes of the same service.
    pub poll_interval_secs: u64,
    /// Overall deadline in seconds. Absent means wait forever, which is
    /// the intended operator-facing behavior for interactive bring-up.
    pub timeout_secs: Option<u64>,
}

/// Downstream import process launched once the stack is healthy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImporterConfig {
    pub command: String,
    pub args: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the built-in
    /// defaults. Bare `stackpilot start` next to a compose manifest
    /// needs no config file.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host",
                reason: "cannot be empty".into(),
            });
        }
        if self.services.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "service",
                reason: "at least one service must be declared".into(),
            });
        }
        for service in &self.services {
            if service.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "service.name",
                    reason: "cannot be empty".into(),
                });
            }
            if !service.health_path.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: "service.health_path",
                    reason: format!("'{}' must start with '/'", service.health_path),
                });
            }
            let url = service.health_url(&self.host);
            if let Err(e) = Url::parse(&url) {
                return Err(ConfigError::InvalidValue {
                    field: "service",
                    reason: format!("'{url}' is not a valid URL: {e}"),
                });
            }
        }
        if self.readiness.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "readiness.poll_interval_secs",
                reason: "must be at least 1".into(),
            });
        }
        if self.compose.bin.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "compose.bin",
                reason: "cannot be empty".into(),
            });
        }
        if self.importer.command.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "importer.command",
                reason: "cannot be empty".into(),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            compose: ComposeConfig::default(),
            services: vec![
                ServiceConfig {
                    name: "influxdb".into(),
                    port: 8086,
                    health_path: "/ping".into(),
                },
                ServiceConfig {
                    name: "grafana".into(),
                    port: 3000,
                    health_path: "/api/health".into(),
                },
            ],
            readiness: ReadinessConfig::default(),
            importer: ImporterConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            bin: "docker-compose".into(),
            file: "docker-compose.yml".into(),
            project: None,
            log_file: "compose-up.log".into(),
        }
    }
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 1,
            timeout_secs: None,
        }
    }
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            command: "python".into(),
            args: vec!["scripts/sample_data_importer.py".into()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
