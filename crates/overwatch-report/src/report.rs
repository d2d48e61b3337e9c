//! Markdown report for a single run

use chrono::{DateTime, SecondsFormat, Utc};
use overwatch_core::{ActionStatus, AgentAction, AgentRunLog, OpenMap, ToolCallEntry};
use serde_json::Value;

use crate::format::{
    code_fence, code_span, format_duration, format_thousands, table_cell, truncate_chars,
};

/// Longest prior summary shown before truncation
const PRIOR_SUMMARY_MAX_CHARS: usize = 200;
/// Longest tool-call table cell shown before truncation
const TOOL_CELL_MAX_CHARS: usize = 120;

/// Render a run as Markdown, stamped with the current time.
pub fn generate_run_report(run: &AgentRunLog) -> String {
    generate_run_report_at(run, Utc::now())
}

/// Render a run as Markdown with an explicit "Generated" time.
///
/// Sections always appear in this order: Summary, Instruction, State at
/// Start, Tool Calls, Findings, Assessment, Actions Taken, State Changes.
/// Findings and assessment are copied verbatim except that trailing line
/// breaks are trimmed, so every section is followed by exactly one blank
/// line. The output ends with a line break.
pub fn generate_run_report_at(run: &AgentRunLog, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Agent Run Report: {}\n\n", run.agent_name));
    out.push_str(&format!("**Run #{:04}**\n\n", run.run_id));
    out.push_str(&format!("_Generated: {}_\n", timestamp(generated_at)));

    section(&mut out, "Summary", &summary_table(run));
    section(&mut out, "Instruction", &instruction_block(&run.instruction));
    section(&mut out, "State at Start", &state_at_start(run));
    section(&mut out, "Tool Calls", &tool_calls(&run.tool_calls));
    section(
        &mut out,
        "Findings",
        or_placeholder(&run.findings, "_No findings recorded._"),
    );
    section(
        &mut out,
        "Assessment",
        or_placeholder(&run.assessment, "_No assessment recorded._"),
    );
    section(&mut out, "Actions Taken", &actions(&run.actions));
    section(&mut out, "State Changes", &state_changes(run));

    out
}

fn section(out: &mut String, title: &str, body: &str) {
    out.push_str(&format!("\n## {}\n\n", title));
    out.push_str(body.trim_end_matches(['\n', '\r']));
    out.push('\n');
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.is_empty() { placeholder } else { text }
}

pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn summary_table(run: &AgentRunLog) -> String {
    let model = if run.llm.model.is_empty() {
        "_unknown_".to_string()
    } else {
        table_cell(&run.llm.model, usize::MAX)
    };

    let rows = [
        ("Run ID", run.run_id.to_string()),
        ("Timestamp", timestamp(run.timestamp)),
        ("Duration", format_duration(run.duration_ms)),
        ("Model", model),
        ("Total Tokens", format_thousands(run.llm.total_tokens)),
        // Count of logged calls, not `llm.tool_call_count`, so the row matches the table below
        ("Tool Calls", run.tool_calls.len().to_string()),
    ];

    let mut table = String::from("| Field | Value |\n|-------|-------|\n");
    for (field, value) in rows {
        table.push_str(&format!("| {} | {} |\n", field, value));
    }
    table
}

fn instruction_block(instruction: &str) -> String {
    let text = instruction.trim();
    let fence = code_fence(text);
    if text.is_empty() {
        format!("{fence}\n{fence}")
    } else {
        format!("{fence}\n{text}\n{fence}")
    }
}

fn state_at_start(run: &AgentRunLog) -> String {
    let state = &run.state_at_start;
    let prior = if state.summary.is_empty() {
        "_none_".to_string()
    } else {
        truncate_chars(&state.summary, PRIOR_SUMMARY_MAX_CHARS)
    };

    format!(
        "- **Run Count:** {}\n- **Active Issues:** {}\n- **Prior Summary:** {}",
        state.run_count, state.active_issue_count, prior
    )
}

fn tool_calls(calls: &[ToolCallEntry]) -> String {
    if calls.is_empty() {
        return "_No tool calls made._".to_string();
    }

    let mut ordered: Vec<&ToolCallEntry> = calls.iter().collect();
    ordered.sort_by_key(|call| call.sequence);

    let mut table = String::from(
        "| # | Tool | Args | Result | Duration |\n|---|------|------|--------|----------|\n",
    );
    for call in ordered {
        table.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            call.sequence,
            table_cell(&call.tool, usize::MAX),
            table_cell(&format_args_map(&call.args), TOOL_CELL_MAX_CHARS),
            table_cell(&call.result_summary, TOOL_CELL_MAX_CHARS),
            format_duration(call.duration_ms),
        ));
    }
    table
}

/// `key=value` pairs in key order; strings unquoted, other values as JSON.
fn format_args_map(args: &OpenMap) -> String {
    if args.is_empty() {
        return "-".to_string();
    }
    args.iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{}={}", key, s),
            other => format!("{}={}", key, other),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn actions(actions: &[AgentAction]) -> String {
    if actions.is_empty() {
        return "_No actions taken._".to_string();
    }

    actions
        .iter()
        .map(|action| {
            let glyph = match action.status {
                ActionStatus::Sent => "✅",
                ActionStatus::Failed => "❌",
            };
            let mut line = format!("- **{}** {} {}", action.action_type, glyph, action.status);
            if let Some(title) = action.detail_str("title") {
                line.push_str(&format!(" · title: {}", title));
            }
            if let Some(channel) = action.detail_str("channel") {
                line.push_str(&format!(" · channel: {}", channel));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn state_changes(run: &AgentRunLog) -> String {
    let changes = &run.state_changes;
    if changes.is_empty() {
        return "_No state changes._".to_string();
    }

    let mut lines = Vec::new();
    for (ids, verb) in [
        (&changes.created, "created"),
        (&changes.updated, "updated"),
        (&changes.resolved, "resolved"),
    ] {
        for id in ids {
            lines.push(format!("- {} {}", code_span(id), verb));
        }
    }
    if changes.summary_updated {
        lines.push("- Summary updated".to_string());
    }
    lines.join("\n")
}
