//! Command-line interface definitions.

pub mod lifecycle;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stackpilot - monitoring stack lifecycle controller.
#[derive(Parser, Debug)]
#[command(name = "stackpilot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (built-in defaults if absent)
    #[arg(short, long, global = true, default_value = "stackpilot.toml")]
    pub config: PathBuf,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bring the stack up, wait until every service is healthy, then run the importer
    Start,

    /// Tear the stack down
    Stop,

    /// Stop, then start
    Restart,
}
