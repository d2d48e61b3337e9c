//! Overwatch CLI
//!
//! Creates monitoring agents, records their runs and renders their history.

mod cli;
mod commands;
mod context;
mod error;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use commands::HistoryArgs;
use context::Workspace;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.workspace.as_deref()),
        None => {
            println!("{} Monitoring agent context manager", "overwatch".green().bold());
            println!();
            println!("Run {} for available commands.", "overwatch --help".cyan());
            Ok(())
        }
    }
}

/// Logs go to stderr so `--json` output stays machine-readable.
fn init_tracing(verbose: bool) {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    if result.is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

fn execute_command(cmd: Commands, workspace: Option<&Path>) -> Result<()> {
    if let Commands::Completions { shell } = cmd {
        commands::run_completions(shell);
        return Ok(());
    }

    let workspace = Workspace::resolve(workspace)?;

    match cmd {
        Commands::Start { instruction, name } => {
            commands::run_start(&workspace, &name, &instruction)
        }
        Commands::List { json } => commands::run_list(&workspace, json),
        Commands::History {
            name,
            limit,
            run,
            json,
            output,
        } => commands::run_history(
            &workspace,
            &HistoryArgs {
                name,
                limit,
                run,
                json,
                output,
            },
        ),
        Commands::Pause { name } => commands::run_pause(&workspace, &name),
        Commands::Resume { name } => commands::run_resume(&workspace, &name),
        Commands::Context { name } => commands::run_context(&workspace, &name),
        Commands::Record { name, file } => commands::run_record(&workspace, &name, &file),
        Commands::Completions { .. } => Ok(()),
    }
}
