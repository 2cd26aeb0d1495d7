use std::time::Duration;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures driving the container-orchestration tool.
#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
    },
}

/// Failures running the downstream import process.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to launch importer `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("importer exited with code {code:?}")]
    Failed { code: Option<i32> },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("services not ready after {waited:?}")]
    ReadinessTimeout { waited: Duration },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code to report for this error.
    ///
    /// An importer failure propagates the child's own exit code when the
    /// child terminated normally; everything else maps to 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Import(ImportError::Failed { code: Some(code) }) => *code,
            _ => 1,
        }
    }
}
