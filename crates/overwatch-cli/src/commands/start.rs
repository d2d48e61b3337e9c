//! Start command implementation

use colored::Colorize;

use crate::context::Workspace;
use crate::error::Result;

/// Run the start command: create an agent with its standing instruction.
pub fn run_start(workspace: &Workspace, name: &str, instruction: &str) -> Result<()> {
    let agent = workspace.manager().create_agent(name, instruction)?;

    println!(
        "{} Agent {} created ({}).",
        "OK".green().bold(),
        agent.name.cyan(),
        agent.status.to_string().green()
    );
    println!(
        "Record runs with {}.",
        format!("overwatch record {} --file <run.json>", agent.name).cyan()
    );
    Ok(())
}
