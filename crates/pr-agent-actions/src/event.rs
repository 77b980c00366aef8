// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Event log reading
//!
//! The log is a single JSON array of event objects, appended to by an external
//! webhook receiver. This module only reads it. Events are kept opaque so the
//! recent-events query can hand them back exactly as recorded.

use crate::error::ActionsError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Event type recorded for workflow run webhooks
pub const WORKFLOW_RUN_EVENT: &str = "workflow_run";

/// A single recorded CI event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CiEvent(Map<String, Value>);

impl CiEvent {
    /// Wrap a JSON object
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Look up an arbitrary field
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// The webhook event type (e.g. `workflow_run`, `check_run`)
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.get_str("event")
    }

    /// Whether this is a workflow run event
    #[must_use]
    pub fn is_workflow_run(&self) -> bool {
        self.event_type() == Some(WORKFLOW_RUN_EVENT)
    }

    /// Name of the workflow the event belongs to
    #[must_use]
    pub fn workflow_name(&self) -> Option<&str> {
        self.get_str("workflow_name")
    }

    /// Run identifier, in whatever JSON form it was recorded
    #[must_use]
    pub fn run_id(&self) -> Option<&Value> {
        self.0.get("run_id")
    }

    /// Run status (e.g. `queued`, `in_progress`, `completed`)
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.get_str("status")
    }

    /// Run conclusion (e.g. `success`, `failure`)
    #[must_use]
    pub fn conclusion(&self) -> Option<&str> {
        self.get_str("conclusion")
    }

    /// Last-updated timestamp as recorded (not parsed)
    #[must_use]
    pub fn updated_at(&self) -> Option<&str> {
        self.get_str("updated_at")
    }

    /// Borrow the underlying JSON object
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for CiEvent {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Parse the contents of an event log
///
/// Empty or whitespace-only input is an empty log, since the receiver may
/// create the file before its first write.
///
/// # Errors
///
/// Returns `ActionsError::JsonParse` for malformed JSON and
/// `ActionsError::InvalidFormat` when the document is not an array of objects.
pub fn parse_events(input: &str) -> Result<Vec<CiEvent>, ActionsError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let Value::Array(items) = serde_json::from_str::<Value>(input)? else {
        return Err(ActionsError::InvalidFormat {
            message: "expected a JSON array of events".to_string(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(CiEvent(fields)),
            other => Err(ActionsError::InvalidFormat {
                message: format!("event {index} is not an object: {other}"),
            }),
        })
        .collect()
}

/// Read-only handle on the event log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    /// Create a handle for the log at `path`; the file need not exist yet
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the log path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every recorded event
    ///
    /// A log file that does not exist yet yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `ActionsError` if the file exists but cannot be read or parsed.
    pub fn read_all(&self) -> Result<Vec<CiEvent>, ActionsError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Event log not found; treating as empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            warn!(path = %self.path.display(), "Event log is empty");
        }
        let events = parse_events(&content)?;
        debug!(path = %self.path.display(), count = events.len(), "Read event log");
        Ok(events)
    }

    /// The last `limit` events, oldest first
    ///
    /// Events are assumed to be appended in chronological order; this is not
    /// verified.
    ///
    /// # Errors
    ///
    /// Returns `ActionsError` if the log cannot be read or parsed.
    pub fn recent(&self, limit: usize) -> Result<Vec<CiEvent>, ActionsError> {
        let mut events = self.read_all()?;
        let skip = events.len().saturating_sub(limit);
        Ok(events.split_off(skip))
    }
}
