//! Handlers for the `start`, `stop`, and `restart` commands.

use crate::cli::output;
use crate::config::Config;
use crate::controller::StackController;
use crate::error::Result;

/// Execute the start command: bring up, health-gate, import.
pub async fn execute_start(config: &Config) -> Result<()> {
    let mut controller = StackController::from_config(config)?;

    output::step("Bringing the stack up");
    controller.start().await?;
    output::success("Stack ready, import finished");
    Ok(())
}

/// Execute the stop command.
pub async fn execute_stop(config: &Config) -> Result<()> {
    let controller = StackController::from_config(config)?;

    output::step("Tearing the stack down");
    controller.stop().await?;
    output::success("Stack stopped");
    Ok(())
}

/// Execute the restart command: a full stop, then a full start.
pub async fn execute_restart(config: &Config) -> Result<()> {
    let mut controller = StackController::from_config(config)?;

    output::step("Restarting the stack");
    controller.restart().await?;
    output::success("Stack ready, import finished");
    Ok(())
}
