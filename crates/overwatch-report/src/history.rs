//! Tabular overview of several runs

use overwatch_core::{ActionStatus, AgentRunLog};

use crate::format::{format_duration, format_thousands};
use crate::report::timestamp;

/// Render one table row per run, in the order given.
pub fn generate_history_overview(agent_name: &str, runs: &[AgentRunLog]) -> String {
    let mut out = format!("# Run History: {}\n\n", agent_name);

    if runs.is_empty() {
        out.push_str("_No runs recorded._\n");
        return out;
    }

    out.push_str("| Run | Timestamp | Duration | Tokens | Tool Calls | Actions | Issues |\n");
    out.push_str("|-----|-----------|----------|--------|------------|---------|--------|\n");
    for run in runs {
        out.push_str(&format!(
            "| #{:04} | {} | {} | {} | {} | {} | {} |\n",
            run.run_id,
            timestamp(run.timestamp),
            format_duration(run.duration_ms),
            format_thousands(run.llm.total_tokens),
            run.tool_calls.len(),
            action_counts(run),
            issue_delta(run),
        ));
    }
    out
}

fn action_counts(run: &AgentRunLog) -> String {
    if run.actions.is_empty() {
        return "-".to_string();
    }
    let sent = run
        .actions
        .iter()
        .filter(|a| a.status == ActionStatus::Sent)
        .count();
    let failed = run.actions.len() - sent;
    match (sent, failed) {
        (_, 0) => format!("{} sent", sent),
        (0, _) => format!("{} failed", failed),
        _ => format!("{} sent, {} failed", sent, failed),
    }
}

fn issue_delta(run: &AgentRunLog) -> String {
    let changes = &run.state_changes;
    format!("+{} -{}", changes.created.len(), changes.resolved.len())
}
