//! CLI output formatting.
//!
//! Human-readable lines with colored symbols, plus a JSON mode for
//! scripting and a quiet mode that drops non-essential output. The
//! tracing subscriber carries diagnostics; this module carries the
//! handful of lines an operator actually watches.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings from global CLI flags. Call once, early.
pub fn configure(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// A progress step the operator is waiting on.
pub fn step(message: impl Display) {
    let config = read_config();
    if config.json {
        emit_json_line("step", json!({ "message": message.to_string() }));
        return;
    }
    if config.quiet {
        return;
    }
    println!("{} {message}", "→".cyan());
}

/// A completed phase.
pub fn success(message: impl Display) {
    let config = read_config();
    if config.json {
        emit_json_line("success", json!({ "message": message.to_string() }));
        return;
    }
    println!("{} {message}", "✓".green());
}

/// A terminal failure. Always printed, to stderr.
pub fn failure(message: impl Display) {
    let config = read_config();
    if config.json {
        emit_json_line("error", json!({ "message": message.to_string() }));
        return;
    }
    eprintln!("{} {message}", "✗".red());
}
