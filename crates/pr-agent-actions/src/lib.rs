// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! pr-agent-actions: GitHub Actions event log processing for pr-agent-mcp
//!
//! This library crate reads the flat JSON event log written by an external
//! webhook receiver and reduces it for consumption by the pr-agent-mcp server.
//!
//! # Example
//!
//! ```no_run
//! use pr_agent_actions::{EventLog, latest_per_workflow};
//!
//! let log = EventLog::new("github_events.json");
//! let recent = log.recent(5).unwrap();
//! let statuses = latest_per_workflow(&log.read_all().unwrap(), None);
//! println!("{} recent events, {} workflows", recent.len(), statuses.len());
//! ```

pub mod error;
pub mod event;
pub mod status;

pub use error::ActionsError;
pub use event::{CiEvent, EventLog, WORKFLOW_RUN_EVENT, parse_events};
pub use status::{WorkflowStatus, is_newer, latest_per_workflow};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::ActionsError;
    pub use crate::event::{CiEvent, EventLog};
    pub use crate::status::{WorkflowStatus, latest_per_workflow};
}
