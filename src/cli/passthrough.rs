//! `install`, `test` and `test-coverage`: configured commands run as-is.

use crate::config::CommandsConfig;
use crate::error::Result;
use crate::tools::{display_command, ToolRunner};
use crate::ui;

/// Run each install command in order, stopping at the first failure.
pub fn install<T: ToolRunner>(tools: &T, commands: &CommandsConfig) -> Result<()> {
    for command in &commands.install {
        ui::display_status(&format!("Running {}", display_command(command)));
        tools.passthrough(command)?;
    }
    ui::display_success("Dependencies installed");
    Ok(())
}

/// Run the test suite.
pub fn test<T: ToolRunner>(tools: &T, commands: &CommandsConfig) -> Result<()> {
    ui::display_status(&format!("Running {}", display_command(&commands.test)));
    tools.passthrough(&commands.test)
}

/// Run the test suite with coverage reporting.
pub fn test_coverage<T: ToolRunner>(tools: &T, commands: &CommandsConfig) -> Result<()> {
    ui::display_status(&format!(
        "Running {}",
        display_command(&commands.coverage)
    ));
    tools.passthrough(&commands.coverage)
}
