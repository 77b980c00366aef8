// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Latest-status reduction over workflow run events

use crate::event::CiEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Workflow name used for events that do not carry one
pub const UNKNOWN_WORKFLOW: &str = "unknown";

/// The latest known state of one workflow
///
/// `run_id`, `status` and `conclusion` are copied from the selected event as
/// recorded, with `null` for a missing field. `updated_at` is the tie-break
/// key, so only a string timestamp is kept. A run whose `workflow_name` is
/// missing or not a string is grouped under [`UNKNOWN_WORKFLOW`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStatus {
    /// Workflow name
    pub workflow_name: String,
    /// Run identifier of the selected event
    pub run_id: Value,
    /// Run status
    pub status: Value,
    /// Run conclusion, once completed
    pub conclusion: Value,
    /// Timestamp of the selected event, as recorded
    pub updated_at: Option<String>,
}

impl WorkflowStatus {
    fn project(name: &str, event: &CiEvent) -> Self {
        Self {
            workflow_name: name.to_string(),
            run_id: event.run_id().cloned().unwrap_or(Value::Null),
            status: event.get("status").cloned().unwrap_or(Value::Null),
            conclusion: event.get("conclusion").cloned().unwrap_or(Value::Null),
            updated_at: event.updated_at().map(str::to_string),
        }
    }
}

/// Tie-break between the current candidate and a newer-looking event
///
/// The new event wins only if its timestamp is present, non-empty and
/// lexicographically greater than the candidate's (a missing candidate
/// timestamp compares as the empty string). This is a string comparison, which
/// matches chronological order only for consistently formatted ISO-8601
/// timestamps.
#[must_use]
pub fn is_newer(candidate: Option<&str>, new: Option<&str>) -> bool {
    match new {
        Some(new) if !new.is_empty() => candidate.unwrap_or("") < new,
        _ => false,
    }
}

/// Reduce workflow run events to one status per workflow
///
/// Non-`workflow_run` events are ignored. When `workflow_name` is given (and
/// non-empty) only that workflow is considered. Results are ordered by the
/// first appearance of each workflow name in `events`.
#[must_use]
pub fn latest_per_workflow(events: &[CiEvent], workflow_name: Option<&str>) -> Vec<WorkflowStatus> {
    let filter = workflow_name.filter(|name| !name.is_empty());
    let mut latest: Vec<WorkflowStatus> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for event in events.iter().filter(|e| e.is_workflow_run()) {
        if filter.is_some() && event.workflow_name() != filter {
            continue;
        }

        let name = event.workflow_name().unwrap_or(UNKNOWN_WORKFLOW);
        match index.get(name) {
            Some(&slot) => {
                if is_newer(latest[slot].updated_at.as_deref(), event.updated_at()) {
                    latest[slot] = WorkflowStatus::project(name, event);
                }
            }
            None => {
                index.insert(name.to_string(), latest.len());
                latest.push(WorkflowStatus::project(name, event));
            }
        }
    }

    latest
}
