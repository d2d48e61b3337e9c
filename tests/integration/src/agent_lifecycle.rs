//! Full agent lifecycle across store, context manager and renderer
//!
//! create -> run context -> record several runs -> pause -> history ->
//! report, all against one on-disk workspace.

use chrono::{Duration, TimeZone, Utc};
use overwatch_core::{
    ActionStatus, AgentAction, AgentContextManager, AgentRunLog, AgentStatus, StateChanges,
    ToolCallEntry,
};
use overwatch_report::{generate_history_overview, generate_run_report_at};
use overwatch_test_utils::TestWorkspace;
use overwatch_test_utils::fixtures::sample_run_json;
use pretty_assertions::assert_eq;

fn run_at(minutes: i64) -> AgentRunLog {
    let start = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
    AgentRunLog::new(start + Duration::minutes(minutes))
}

#[test]
fn monitoring_agent_over_three_runs() {
    let ws = TestWorkspace::new();
    let manager = AgentContextManager::open(ws.root()).unwrap();

    let created = manager
        .create_agent("disk-watch", "Check disk usage on all volumes.")
        .unwrap();
    assert_eq!(created.status, AgentStatus::Active);
    assert_eq!(created.run_count, 0);

    // Run 1: two issues found, summary set
    let context = manager.run_context("disk-watch").unwrap();
    assert_eq!(context.next_run_id, 1);
    let first = run_at(0)
        .with_duration_ms(12_500)
        .with_tool_call(ToolCallEntry::new(1, "df").with_result("col1 | col2"))
        .with_assessment("Two volumes are filling up.")
        .with_action(AgentAction::new("teams", ActionStatus::Sent, Utc::now()).with_detail("title", "Disks"))
        .with_state_changes(
            StateChanges::default()
                .with_created(["DISK-VAR", "DISK-HOME"])
                .with_summary_updated(true),
        )
        .with_summary("/var and /home above 90%");
    let first = manager.record_run("disk-watch", first).unwrap();
    assert_eq!(first.run_id, 1);
    assert_eq!(first.state_at_start.run_count, 0);
    assert_eq!(first.instruction, "Check disk usage on all volumes.");

    // Run 2: one issue resolved, summary kept
    let second = run_at(30).with_state_changes(StateChanges::default().with_resolved(["DISK-HOME"]));
    let second = manager.record_run("disk-watch", second).unwrap();
    assert_eq!(second.run_id, 2);
    assert_eq!(second.state_at_start.active_issue_count, 2);
    assert_eq!(second.state_at_start.summary, "/var and /home above 90%");

    let agent = manager.get_agent("disk-watch").unwrap();
    assert_eq!(agent.run_count, 2);
    assert_eq!(agent.active_issue_count, 1);
    assert_eq!(agent.summary, "/var and /home above 90%");

    // Pausing does not stop a driver from recording a run already in flight
    manager
        .set_agent_status("disk-watch", AgentStatus::Paused)
        .unwrap();
    let third = run_at(60).with_state_changes(
        StateChanges::default()
            .with_updated(["DISK-VAR"])
            .with_summary_updated(true),
    );
    let third = third.with_assessment("  /var still at 93%  ");
    manager.record_run("disk-watch", third).unwrap();

    let agent = manager.get_agent("disk-watch").unwrap();
    assert_eq!(agent.status, AgentStatus::Paused);
    assert_eq!(agent.run_count, 3);
    assert_eq!(agent.active_issue_count, 1);
    assert_eq!(agent.summary, "/var still at 93%");

    // History: newest first
    let history = manager.get_history("disk-watch", None).unwrap();
    assert_eq!(
        history.iter().map(|r| r.run_id).collect::<Vec<_>>(),
        vec![3, 2, 1]
    );
    let latest = manager.get_history("disk-watch", Some(1)).unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].run_id, 3);

    // Rendering the stored record
    let stored = manager.get_run("disk-watch", 1).unwrap();
    let report = generate_run_report_at(&stored, Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap());
    assert!(report.starts_with("# Agent Run Report: disk-watch\n\n**Run #0001**\n"));
    assert!(report.contains("| Duration | 12.5s |"));
    assert!(report.contains("| 1 | df | - | col1 \\| col2 | 0ms |"));
    assert!(report.contains("- **teams** ✅ sent · title: Disks"));
    assert!(report.contains("- `DISK-HOME` created\n- `DISK-VAR` created\n- Summary updated"));

    let overview = generate_history_overview("disk-watch", &history);
    let rows: Vec<&str> = overview.lines().filter(|l| l.starts_with("| #")).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("| #0003 |"));
    assert!(rows[2].ends_with("| 1 sent | +2 -0 |"));
}

#[test]
fn external_json_record_round_trips_through_disk() {
    let ws = TestWorkspace::new();
    let manager = AgentContextManager::open(ws.root()).unwrap();
    manager.create_agent("disk-watch", "Check disks").unwrap();

    let run: AgentRunLog = serde_json::from_value(sample_run_json()).unwrap();
    let recorded = manager.record_run("disk-watch", run).unwrap();

    let files = ws.run_files("disk-watch");
    assert_eq!(files, vec!["000001-20261019T083000000Z.json".to_string()]);

    let raw: serde_json::Value =
        serde_json::from_str(&ws.read_file(&format!("agents/disk-watch/runs/{}", files[0]))).unwrap();
    assert_eq!(raw["runId"], 1);
    assert_eq!(raw["agentName"], "disk-watch");
    assert_eq!(raw["actions"][0]["run"], 1);
    assert_eq!(raw["toolCalls"][0]["resultSummary"], "col1 | col2 | col3");

    let reread = manager.get_run("disk-watch", 1).unwrap();
    assert_eq!(reread, recorded);
}

#[test]
fn agents_are_isolated() {
    let ws = TestWorkspace::new();
    let manager = AgentContextManager::open(ws.root()).unwrap();
    manager.create_agent("disk-watch", "Check disks").unwrap();
    manager.create_agent("cert-watch", "Check certificates").unwrap();

    manager.record_run("disk-watch", run_at(0)).unwrap();
    manager.record_run("disk-watch", run_at(5)).unwrap();
    let cert_run = manager.record_run("cert-watch", run_at(10)).unwrap();

    assert_eq!(cert_run.run_id, 1);
    assert_eq!(manager.get_agent("cert-watch").unwrap().run_count, 1);
    assert_eq!(manager.get_agent("disk-watch").unwrap().run_count, 2);

    let names: Vec<String> = manager
        .list_agents()
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["cert-watch", "disk-watch"]);
}
