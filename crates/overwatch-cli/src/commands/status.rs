//! Pause and resume commands

use colored::Colorize;
use overwatch_core::AgentStatus;

use crate::context::Workspace;
use crate::error::Result;

/// Run the pause command
pub fn run_pause(workspace: &Workspace, name: &str) -> Result<()> {
    set_status(workspace, name, AgentStatus::Paused)
}

/// Run the resume command
pub fn run_resume(workspace: &Workspace, name: &str) -> Result<()> {
    set_status(workspace, name, AgentStatus::Active)
}

fn set_status(workspace: &Workspace, name: &str, status: AgentStatus) -> Result<()> {
    let agent = workspace.manager().set_agent_status(name, status)?;

    let label = match agent.status {
        AgentStatus::Active => agent.status.to_string().green(),
        AgentStatus::Paused => agent.status.to_string().yellow(),
    };
    println!("{} Agent {} is {}.", "OK".green().bold(), agent.name.cyan(), label);
    Ok(())
}
