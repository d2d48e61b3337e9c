//! List command implementation

use colored::Colorize;
use overwatch_core::{Agent, AgentStatus};

use crate::context::Workspace;
use crate::error::Result;

/// Run the list command
pub fn run_list(workspace: &Workspace, json: bool) -> Result<()> {
    let agents = workspace.manager().list_agents()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&agents)?);
        return Ok(());
    }

    if agents.is_empty() {
        println!("{}", "No agents found.".dimmed());
        println!();
        println!(
            "Run {} to create one.",
            "overwatch start <instruction> --name <name>".cyan()
        );
        return Ok(());
    }

    println!("{} {}", "Agents in".bold(), workspace.root().to_string().dimmed());
    println!();
    for agent in &agents {
        println!("{}", format_agent_line(agent));
    }
    println!();
    println!("{} {} agents", "Total:".dimmed(), agents.len());

    Ok(())
}

fn format_agent_line(agent: &Agent) -> String {
    let status = match agent.status {
        AgentStatus::Active => agent.status.to_string().green(),
        AgentStatus::Paused => agent.status.to_string().yellow(),
    };
    let last_run = agent
        .last_run_at
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    format!(
        "  {:<24} {:<8} {:>5} runs {:>4} open issues  last run: {}",
        agent.name.cyan(),
        status,
        agent.run_count,
        agent.active_issue_count,
        last_run.dimmed()
    )
}
