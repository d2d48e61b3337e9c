//! History command implementation
//!
//! One run renders as a full Markdown report, several as an overview
//! table. `--json` emits the raw records instead.

use std::path::PathBuf;

use colored::Colorize;
use overwatch_core::AgentRunLog;
use overwatch_fs::NormalizedPath;
use overwatch_fs::io::publish_atomic;
use overwatch_report::{generate_history_overview, generate_run_report};

use crate::context::Workspace;
use crate::error::{CliError, Result};

/// Arguments of the history command
#[derive(Debug, Clone, Default)]
pub struct HistoryArgs {
    pub name: String,
    pub limit: Option<usize>,
    pub run: Option<u64>,
    pub json: bool,
    pub output: Option<PathBuf>,
}

/// Run the history command
pub fn run_history(workspace: &Workspace, args: &HistoryArgs) -> Result<()> {
    let text = render_history(workspace, args)?;

    match &args.output {
        Some(path) => {
            let target = NormalizedPath::new(path);
            publish_atomic(&target, text.as_bytes(), workspace.config().robustness())?;
            println!(
                "{} Wrote history for {} to {}",
                "OK".green().bold(),
                args.name.cyan(),
                target
            );
        }
        None => print!("{}", text),
    }
    Ok(())
}

/// Produce the text the history command prints or writes.
pub fn render_history(workspace: &Workspace, args: &HistoryArgs) -> Result<String> {
    let manager = workspace.manager();

    if let Some(run_id) = args.run {
        let run = manager.get_run(&args.name, run_id)?;
        return if args.json {
            to_json(&run)
        } else {
            Ok(generate_run_report(&run))
        };
    }

    let limit = match args.limit {
        Some(0) => return Err(CliError::user("--limit must be at least 1")),
        Some(limit) => Some(limit),
        None => workspace.config().history.default_limit,
    };
    let runs = manager.get_history(&args.name, limit)?;
    tracing::debug!(agent = %args.name, runs = runs.len(), "Loaded history");

    if args.json {
        return to_json(&runs);
    }
    Ok(render_runs(&args.name, &runs))
}

fn render_runs(name: &str, runs: &[AgentRunLog]) -> String {
    match runs {
        [single] => generate_run_report(single),
        _ => generate_history_overview(name, runs),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}
