//! Record command implementation

use std::path::Path;

use colored::Colorize;
use overwatch_core::AgentRunLog;
use overwatch_fs::NormalizedPath;
use overwatch_fs::io::read_text;

use crate::context::Workspace;
use crate::error::{CliError, Result};

/// Run the record command: store a run log produced by a driver.
pub fn run_record(workspace: &Workspace, name: &str, file: &Path) -> Result<()> {
    let run = load_run_file(file)?;
    let recorded = workspace.manager().record_run(name, run)?;

    println!(
        "{} Recorded run {} for {}.",
        "OK".green().bold(),
        format!("#{}", recorded.run_id).bold(),
        recorded.agent_name.cyan()
    );
    Ok(())
}

fn load_run_file(file: &Path) -> Result<AgentRunLog> {
    let content = read_text(&NormalizedPath::new(file))?;
    serde_json::from_str(&content).map_err(|e| {
        CliError::user(format!("Invalid run log {}: {}", file.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use overwatch_test_utils::TestWorkspace;
    use overwatch_test_utils::fixtures::{sample_run_json, to_pretty};

    #[test]
    fn records_fixture_run() {
        let ws = TestWorkspace::new();
        let workspace = Workspace::at(ws.root()).unwrap();
        workspace
            .manager()
            .create_agent("disk-watch", "Check disks")
            .unwrap();
        ws.write_file("run.json", &to_pretty(&sample_run_json()));

        run_record(&workspace, "disk-watch", &ws.root().join("run.json")).unwrap();
        run_record(&workspace, "disk-watch", &ws.root().join("run.json")).unwrap();

        let agent = workspace.manager().get_agent("disk-watch").unwrap();
        assert_eq!(agent.run_count, 2);
        assert_eq!(agent.active_issue_count, 1);
        assert_eq!(agent.summary, "/var is nearly full");
        assert_eq!(ws.run_files("disk-watch").len(), 2);
    }

    #[test]
    fn malformed_file_is_a_user_error() {
        let ws = TestWorkspace::new();
        let workspace = Workspace::at(ws.root()).unwrap();
        workspace
            .manager()
            .create_agent("disk-watch", "Check disks")
            .unwrap();
        ws.write_file("run.json", "{ not json");

        let err = run_record(&workspace, "disk-watch", &ws.root().join("run.json")).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
        assert!(ws.run_files("disk-watch").is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let ws = TestWorkspace::new();
        let workspace = Workspace::at(ws.root()).unwrap();
        assert!(run_record(&workspace, "disk-watch", &ws.root().join("nope.json")).is_err());
    }
}
