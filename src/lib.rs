//! Stackpilot - lifecycle controller for a containerized monitoring stack.
//!
//! Brings a two-service monitoring stack (time-series database plus
//! dashboard server) up or down through a compose-style orchestration
//! tool, blocks until every service's HTTP health endpoint answers,
//! then hands off to an external data-import process.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`controller`] - The start/stop/restart sequencing
//! - [`orchestrator`] - Compose driver (bring up / tear down)
//! - [`readiness`] - The poll-until-healthy wait and its state machine
//! - [`probe`] - HTTP health probes
//! - [`importer`] - Downstream import hand-off
//! - [`error`] - Error types for the crate
//! - [`cli`] - Command-line surface
//!
//! # Example
//!
//! ```no_run
//! use stackpilot::config::Config;
//! use stackpilot::controller::StackController;
//!
//! # async fn demo() -> stackpilot::error::Result<()> {
//! let config = Config::load_or_default("stackpilot.toml")?;
//! let mut controller = StackController::from_config(&config)?;
//! controller.start().await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod importer;
pub mod orchestrator;
pub mod probe;
pub mod readiness;
