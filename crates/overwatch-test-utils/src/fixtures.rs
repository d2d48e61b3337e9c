//! Run records in the JSON shape an external driver writes.

use serde_json::{Value, json};

/// A complete run record with tool calls, actions and state changes.
///
/// `runId` and `agentName` are left at placeholder values; the context
/// manager overwrites them on record.
pub fn sample_run_json() -> Value {
    json!({
        "runId": 0,
        "agentName": "",
        "timestamp": "2026-10-19T08:30:00Z",
        "durationMs": 12500,
        "instruction": "Check disk usage on all volumes and alert above 90%.",
        "llm": {
            "model": "gpt-4o",
            "promptTokens": 9000,
            "completionTokens": 1500,
            "totalTokens": 10500,
            "toolCallCount": 2
        },
        "toolCalls": [
            {
                "sequence": 1,
                "tool": "df",
                "args": { "human": true },
                "resultSummary": "col1 | col2 | col3",
                "durationMs": 350
            },
            {
                "sequence": 2,
                "tool": "du",
                "args": { "path": "/var/log" },
                "resultSummary": "4.2G\t/var/log",
                "durationMs": 1000
            }
        ],
        "assessment": "Volume /var is at 93%.",
        "findings": "- /var at 93%\n- /home at 40%",
        "actions": [
            {
                "type": "teams",
                "timestamp": "2026-10-19T08:30:12Z",
                "status": "sent",
                "details": { "title": "Disk almost full", "channel": "ops-alerts" }
            },
            {
                "type": "email",
                "timestamp": "2026-10-19T08:30:12Z",
                "status": "failed",
                "details": {}
            }
        ],
        "stateChanges": {
            "created": ["DISK-VAR"],
            "updated": [],
            "resolved": [],
            "summaryUpdated": true
        },
        "summary": "/var is nearly full"
    })
}

/// A run record with every optional section empty.
pub fn empty_run_json(timestamp: &str) -> Value {
    json!({ "timestamp": timestamp })
}

/// Serialize a fixture for writing to disk.
pub fn to_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap()
}
