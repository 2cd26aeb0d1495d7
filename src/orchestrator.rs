//! Container-orchestration driver.
//!
//! Shells out to a compose-style binary to bring the declared service
//! set up or down. The compose manifest itself is opaque configuration;
//! this module only owns command assembly and exit-status handling.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::config::ComposeConfig;
use crate::error::{Error, OrchestrationError, Result};

/// Brings the managed service set up or tears it down as a unit.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn bring_up(&self) -> Result<()>;
    async fn tear_down(&self) -> Result<()>;
}

/// Production orchestrator driving a compose binary.
pub struct ComposeOrchestrator {
    config: ComposeConfig,
}

impl ComposeOrchestrator {
    #[must_use]
    pub fn new(config: ComposeConfig) -> Self {
        Self { config }
    }

    fn render(&self, subcommand: &[&str]) -> Vec<String> {
        let mut args = vec!["-f".to_string(), self.config.file.clone()];
        if let Some(ref project) = self.config.project {
            args.push("-p".to_string());
            args.push(project.clone());
        }
        args.extend(subcommand.iter().map(|s| (*s).to_string()));
        args
    }

    fn command_line(&self, args: &[String]) -> String {
        format!("{} {}", self.config.bin, args.join(" "))
    }

    async fn run(&self, command: &mut Command, command_line: String) -> Result<()> {
        let status = command
            .status()
            .await
            .map_err(|source| OrchestrationError::Spawn {
                command: command_line.clone(),
                source,
            })?;
        if !status.success() {
            return Err(Error::Orchestration(OrchestrationError::Failed {
                command: command_line,
                status,
            }));
        }
        Ok(())
    }
}

#[async_trait]
impl Orchestrator for ComposeOrchestrator {
    /// `up -d`, with the child's combined output redirected to the
    /// configured log file so compose noise stays out of our streams.
    async fn bring_up(&self) -> Result<()> {
        let args = self.render(&["up", "-d"]);
        let command_line = self.command_line(&args);
        info!(command = %command_line, log_file = %self.config.log_file, "bringing stack up");

        let log = tokio::fs::File::create(&self.config.log_file)
            .await?
            .into_std()
            .await;
        let log_err = log.try_clone()?;
        let mut command = Command::new(&self.config.bin);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err));
        self.run(&mut command, command_line).await
    }

    async fn tear_down(&self) -> Result<()> {
        let args = self.render(&["down"]);
        let command_line = self.command_line(&args);
        info!(command = %command_line, "tearing stack down");

        let mut command = Command::new(&self.config.bin);
        command.args(&args).stdin(Stdio::null());
        self.run(&mut command, command_line).await
    }
}
