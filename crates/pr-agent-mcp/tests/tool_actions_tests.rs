// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for the get_recent_actions_events and
//! get_workflow_status tools

mod fixtures;

use fixtures::{sample_events, workflow_run, write_events};
use mcp_harness::{McpTestHarness, assert_error_contains};
use serde_json::json;
use test_utils::TempTestDir;

fn harness_with_events(temp: &TempTestDir, events: Option<&serde_json::Value>) -> McpTestHarness {
    let events_file = temp.path().join("github_events.json");
    if let Some(events) = events {
        write_events(&events_file, events);
    }
    McpTestHarness::new(&temp.path().join("templates"), &events_file)
}

// ============================================================================
// Empty Logs
// ============================================================================

#[test]
fn test_missing_log_is_empty() {
    let temp = TempTestDir::new("actions-missing");
    let harness = harness_with_events(&temp, None);

    assert_eq!(harness.recent_events(None), json!([]));
    assert_eq!(harness.workflow_status(None), json!([]));
}

#[test]
fn test_blank_log_is_empty() {
    let temp = TempTestDir::new("actions-blank");
    temp.create_file("github_events.json", "  \n");
    let harness = harness_with_events(&temp, None);

    assert_eq!(harness.recent_events(Some(5)), json!([]));
    assert_eq!(harness.workflow_status(Some("CI")), json!([]));
}

// ============================================================================
// get_recent_actions_events
// ============================================================================

#[test]
fn test_single_event_is_returned_verbatim() {
    let temp = TempTestDir::new("actions-single");
    let event = workflow_run("CI", 7, "completed", Some("success"), "2024-05-01T09:00:00Z");
    let harness = harness_with_events(&temp, Some(&json!([event.clone()])));

    assert_eq!(harness.recent_events(None), json!([event]));
}

#[test]
fn test_recent_events_returns_tail_in_log_order() {
    let temp = TempTestDir::new("actions-tail");
    let events = sample_events();
    let harness = harness_with_events(&temp, Some(&events));

    let recent = harness.recent_events(Some(3));
    let all = events.as_array().expect("array");
    assert_eq!(recent, json!(all[all.len() - 3..]));
}

#[test]
fn test_default_limit_is_ten() {
    let temp = TempTestDir::new("actions-default-limit");
    let events: Vec<_> = (0..15)
        .map(|i| json!({ "event": "push", "sequence": i }))
        .collect();
    let harness = harness_with_events(&temp, Some(&json!(events)));

    let recent = harness.recent_events(None);
    let recent = recent.as_array().expect("array");
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0]["sequence"], 5);
    assert_eq!(recent[9]["sequence"], 14);
}

#[test]
fn test_zero_limit_returns_nothing() {
    let temp = TempTestDir::new("actions-zero");
    let harness = harness_with_events(&temp, Some(&sample_events()));

    assert_eq!(harness.recent_events(Some(0)), json!([]));
}

#[test]
fn test_limit_beyond_log_returns_everything() {
    let temp = TempTestDir::new("actions-large-limit");
    let events = sample_events();
    let harness = harness_with_events(&temp, Some(&events));

    assert_eq!(harness.recent_events(Some(1000)), events);
}

// ============================================================================
// get_workflow_status
// ============================================================================

#[test]
fn test_latest_run_wins_per_workflow() {
    let temp = TempTestDir::new("status-latest");
    let harness = harness_with_events(&temp, Some(&sample_events()));

    let statuses = harness.workflow_status(None);

    assert_eq!(
        statuses,
        json!([
            {
                "workflow_name": "CI",
                "run_id": 1003,
                "status": "completed",
                "conclusion": "success",
                "updated_at": "2024-05-01T10:15:00Z"
            },
            {
                "workflow_name": "Docs",
                "run_id": 1002,
                "status": "completed",
                "conclusion": "success",
                "updated_at": "2024-05-01T09:03:00Z"
            }
        ])
    );
}

#[test]
fn test_older_event_later_in_log_does_not_win() {
    let temp = TempTestDir::new("status-older");
    let events = json!([
        workflow_run("CI", 2, "completed", Some("failure"), "2024-05-02T00:00:00Z"),
        workflow_run("CI", 1, "completed", Some("success"), "2024-05-01T00:00:00Z"),
    ]);
    let harness = harness_with_events(&temp, Some(&events));

    let statuses = harness.workflow_status(None);
    assert_eq!(statuses[0]["run_id"], 2);
    assert_eq!(statuses[0]["conclusion"], "failure");
}

#[test]
fn test_filter_by_workflow_name() {
    let temp = TempTestDir::new("status-filter");
    let harness = harness_with_events(&temp, Some(&sample_events()));

    let statuses = harness.workflow_status(Some("Docs"));
    let statuses = statuses.as_array().expect("array");
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0]["workflow_name"], "Docs");

    assert_eq!(harness.workflow_status(Some("Release")), json!([]));
}

#[test]
fn test_event_without_name_is_unknown_workflow() {
    let temp = TempTestDir::new("status-unknown");
    let events = json!([{ "event": "workflow_run", "run_id": 9, "status": "queued" }]);
    let harness = harness_with_events(&temp, Some(&events));

    let statuses = harness.workflow_status(None);
    assert_eq!(statuses[0]["workflow_name"], "unknown");
    assert_eq!(statuses[0]["updated_at"], json!(null));
}

// ============================================================================
// Malformed Logs
// ============================================================================

#[test]
fn test_malformed_log_is_error_object() {
    let temp = TempTestDir::new("actions-malformed");
    temp.create_file("github_events.json", "[{\"event\": ");
    let harness = harness_with_events(&temp, None);

    assert_error_contains(&harness.recent_events(None), "Failed to read events");
    assert_error_contains(&harness.workflow_status(None), "Failed to read events");
}

#[test]
fn test_non_array_log_is_error_object() {
    let temp = TempTestDir::new("actions-object");
    let harness = harness_with_events(&temp, Some(&json!({ "event": "push" })));

    assert_error_contains(&harness.recent_events(None), "expected a JSON array");
}
