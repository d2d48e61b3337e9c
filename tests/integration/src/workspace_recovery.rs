//! Workspaces left behind by interrupted writers
//!
//! Hidden staging directories, stray temp files, half-created agents and
//! counters that lag behind the run history must not break readers.

use chrono::{TimeZone, Utc};
use overwatch_core::{AgentContextManager, AgentRunLog, Error, StateChanges};
use overwatch_test_utils::TestWorkspace;
use pretty_assertions::assert_eq;

fn manager(ws: &TestWorkspace) -> AgentContextManager {
    AgentContextManager::open(ws.root()).unwrap()
}

#[test]
fn leftover_staging_and_temp_files_are_ignored() {
    let ws = TestWorkspace::new();
    let manager = manager(&ws);
    manager.create_agent("disk-watch", "Check disks").unwrap();
    manager
        .record_run("disk-watch", AgentRunLog::new(Utc::now()))
        .unwrap();

    ws.write_file("agents/.cert-watch.4242.staging/instruction.md", "half");
    ws.write_file("agents/disk-watch/runs/.000002-x.json.4242.tmp", "{ trunc");
    ws.write_file("agents/disk-watch/runs/notes.txt", "not a run");

    let names: Vec<String> = manager
        .list_agents()
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["disk-watch"]);
    assert_eq!(manager.get_history("disk-watch", None).unwrap().len(), 1);
    assert_eq!(manager.run_context("disk-watch").unwrap().next_run_id, 2);
}

#[test]
fn directory_without_state_is_not_an_agent() {
    let ws = TestWorkspace::new();
    ws.write_file("agents/orphan/instruction.md", "left behind");
    let manager = manager(&ws);

    assert!(manager.list_agents().unwrap().is_empty());
    assert!(manager.get_agent("orphan").unwrap_err().is_not_found());

    let err = manager.create_agent("orphan", "again").unwrap_err();
    assert!(err.is_already_exists());
    assert_eq!(ws.read_file("agents/orphan/instruction.md"), "left behind");
}

#[test]
fn corrupt_state_is_reported_not_overwritten() {
    let ws = TestWorkspace::new();
    let manager = manager(&ws);
    manager.create_agent("disk-watch", "Check disks").unwrap();
    ws.write_file("agents/disk-watch/state.json", "{ \"status\": ");

    let err = manager.get_agent("disk-watch").unwrap_err();
    assert!(matches!(err, Error::InvalidState { .. }), "got {:?}", err);
    assert_eq!(
        ws.read_file("agents/disk-watch/state.json"),
        "{ \"status\": "
    );
}

#[test]
fn counters_catch_up_after_interrupted_record() {
    let ws = TestWorkspace::new();
    let manager = manager(&ws);
    manager.create_agent("disk-watch", "Check disks").unwrap();

    // A run was published but the writer stopped before updating state.json
    let mut orphan = AgentRunLog::new(Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap())
        .with_state_changes(StateChanges::default().with_created(["DISK-VAR"]));
    orphan.run_id = 1;
    orphan.agent_name = "disk-watch".into();
    ws.write_file(
        "agents/disk-watch/runs/000001-20261019T080000000Z.json",
        &serde_json::to_string_pretty(&orphan).unwrap(),
    );
    assert_eq!(manager.get_agent("disk-watch").unwrap().run_count, 0);

    let next = AgentRunLog::new(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap())
        .with_state_changes(StateChanges::default().with_created(["DISK-HOME"]));
    let recorded = manager.record_run("disk-watch", next).unwrap();
    assert_eq!(recorded.run_id, 2);
    assert_eq!(recorded.state_at_start.run_count, 1);
    assert_eq!(recorded.state_at_start.active_issue_count, 1);

    let agent = manager.get_agent("disk-watch").unwrap();
    assert_eq!(agent.run_count, 2);
    assert_eq!(agent.active_issue_count, 2);
}

#[test]
fn missing_workspace_is_never_created() {
    let ws = TestWorkspace::new();
    let manager = AgentContextManager::new(ws.missing_root());

    assert!(matches!(
        manager.create_agent("disk-watch", "x").unwrap_err(),
        Error::WorkspaceNotFound { .. }
    ));
    assert!(manager.list_agents().is_err());
    assert!(!ws.missing_root().exists());
}
