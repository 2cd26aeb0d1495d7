//! Downstream import trigger.
//!
//! Launched exactly once, after every service in the stack has passed
//! its health probe. The importer's exit status is the caller's
//! problem: a failure here becomes our own exit status.

use async_trait::async_trait;
use tracing::info;

use crate::config::ImporterConfig;
use crate::error::{Error, ImportError, Result};

/// Hands off to the data-import process once the stack is healthy.
#[async_trait]
pub trait ImportTrigger: Send + Sync {
    async fn run(&self) -> Result<()>;
}

/// Production trigger spawning the configured program.
pub struct CommandImportTrigger {
    config: ImporterConfig,
}

impl CommandImportTrigger {
    #[must_use]
    pub fn new(config: ImporterConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ImportTrigger for CommandImportTrigger {
    async fn run(&self) -> Result<()> {
        let command_line = if self.config.args.is_empty() {
            self.config.command.clone()
        } else {
            format!("{} {}", self.config.command, self.config.args.join(" "))
        };
        info!(command = %command_line, "starting data import");

        let status = tokio::process::Command::new(&self.config.command)
            .args(&self.config.args)
            .status()
            .await
            .map_err(|source| ImportError::Spawn {
                command: command_line,
                source,
            })?;

        if !status.success() {
            return Err(Error::Import(ImportError::Failed {
                code: status.code(),
            }));
        }
        info!("data import finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn importer_exit_code_is_captured() {
        let trigger = CommandImportTrigger::new(ImporterConfig {
            command: "sh".into(),
            args: vec!["-c".into(), "exit 3".into()],
        });

        let err = trigger.run().await.expect_err("should fail");
        assert!(matches!(
            err,
            Error::Import(ImportError::Failed { code: Some(3) })
        ));
        assert_eq!(err.exit_code(), 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_importer_is_ok() {
        let trigger = CommandImportTrigger::new(ImporterConfig {
            command: "true".into(),
            args: Vec::new(),
        });

        trigger.run().await.expect("importer succeeds");
    }

    #[tokio::test]
    async fn missing_importer_binary_is_a_spawn_error() {
        let trigger = CommandImportTrigger::new(ImporterConfig {
            command: "stackpilot-no-such-importer".into(),
            args: Vec::new(),
        });

        let err = trigger.run().await.expect_err("should fail");
        assert!(matches!(err, Error::Import(ImportError::Spawn { .. })));
        assert_eq!(err.exit_code(), 1);
    }
}
