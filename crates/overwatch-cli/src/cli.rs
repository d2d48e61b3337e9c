//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Overwatch - Persistent context and run history for monitoring agents
#[derive(Parser, Debug)]
#[command(name = "overwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Workspace directory that holds the `agents/` tree
    #[arg(short, long, global = true, env = "OVERWATCH_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a new agent with a standing instruction
    ///
    /// Examples:
    ///   overwatch start "Alert when any volume exceeds 90%" --name disk-watch
    Start {
        /// Natural-language task the agent performs on every run
        instruction: String,

        /// Agent name (letters, digits, '-', '_' and '.')
        #[arg(short, long)]
        name: String,
    },

    /// List all agents in the workspace
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show run history for an agent
    ///
    /// A single run is shown as a full report, several runs as an
    /// overview table, most recent first.
    ///
    /// Examples:
    ///   overwatch history disk-watch --limit 1
    ///   overwatch history disk-watch --run 7 --output run-7.md
    History {
        /// Name of the agent
        name: String,

        /// Show only the N most recent runs
        #[arg(short, long, conflicts_with = "run")]
        limit: Option<usize>,

        /// Show the run with this id
        #[arg(short, long)]
        run: Option<u64>,

        /// Output raw run records as JSON
        #[arg(long)]
        json: bool,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pause an agent
    Pause {
        /// Name of the agent
        name: String,
    },

    /// Resume a paused agent
    Resume {
        /// Name of the agent
        name: String,
    },

    /// Print what a driver needs before running an agent, as JSON
    Context {
        /// Name of the agent
        name: String,
    },

    /// Record a completed run from a JSON run log
    ///
    /// Run id, agent name and starting state are assigned on record.
    Record {
        /// Name of the agent
        name: String,

        /// Path to the run log produced by the driver
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   overwatch completions bash > ~/.local/share/bash-completion/completions/overwatch
    ///   overwatch completions zsh > ~/.zfunc/_overwatch
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
