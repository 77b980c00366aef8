// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tool handlers for the MCP server
//!
//! This module implements the handlers for each MCP tool, bridging MCP
//! requests to git, the template store and the event log. Every tool answers
//! with a single JSON string; failures become an object with an `error` key.

use std::path::{Path, PathBuf};

use pr_agent_actions::{ActionsError, CiEvent, EventLog, WorkflowStatus, latest_per_workflow};
use pr_agent_git::changes::{DEFAULT_BASE_BRANCH, DEFAULT_MAX_DIFF_LINES};
use pr_agent_git::{AnalyzeOptions, ChangeReport, GitError, GitRepo, resolve_working_directory};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::{debug, warn};

use crate::templates::{Recommendation, Template, TemplateError, TemplateStore};

// ============================================================================
// Error Types
// ============================================================================

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A git command failed or the directory is not a repository
    #[error("{0}")]
    Git(#[from] GitError),

    /// Template directory problem
    #[error("{0}")]
    Templates(#[from] TemplateError),

    /// Event log could not be read
    #[error("Failed to read events: {0}")]
    Events(#[from] ActionsError),

    /// The working directory could not be determined
    #[error("Failed to resolve working directory: {0}")]
    WorkingDirectory(std::io::Error),

    /// Invalid input - missing or mistyped argument
    #[error("Invalid input: {0}. Check the tool's required parameters.")]
    InvalidInput(String),

    /// JSON serialization error
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl HandlerError {
    /// Render as the error object returned to callers
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = json!({ "error": self.to_string() });
        if let Self::Git(err) = self
            && let Some(details) = err.details()
        {
            body["details"] = Value::String(details.to_string());
        }
        body
    }
}

// ============================================================================
// Input Types
// ============================================================================

/// Input for the analyze_file_changes tool
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeFileChangesInput {
    /// Base branch to compare against
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
    /// Include the full diff content
    #[serde(default = "default_include_diff")]
    pub include_diff: bool,
    /// Maximum number of diff lines to include
    #[serde(default = "default_max_diff_lines")]
    pub max_diff_lines: usize,
}

fn default_base_branch() -> String {
    DEFAULT_BASE_BRANCH.to_string()
}

fn default_include_diff() -> bool {
    true
}

fn default_max_diff_lines() -> usize {
    DEFAULT_MAX_DIFF_LINES
}

impl From<AnalyzeFileChangesInput> for AnalyzeOptions {
    fn from(input: AnalyzeFileChangesInput) -> Self {
        Self {
            base_branch: input.base_branch,
            include_diff: input.include_diff,
            max_diff_lines: input.max_diff_lines,
        }
    }
}

/// Input for the suggest_template tool
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestTemplateInput {
    /// The caller's analysis of what the changes do
    pub changes_summary: String,
    /// The type of change identified (bug, feature, docs, ...)
    pub change_type: String,
}

/// Input for the get_recent_actions_events tool
#[derive(Debug, Clone, Deserialize)]
pub struct RecentEventsInput {
    /// Maximum number of events to return
    #[serde(default = "default_events_limit")]
    pub limit: usize,
}

fn default_events_limit() -> usize {
    10
}

/// Input for the get_workflow_status tool
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowStatusInput {
    /// Restrict to one workflow
    pub workflow_name: Option<String>,
}

// ============================================================================
// Tool Registry
// ============================================================================

/// The registered tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    /// `analyze_file_changes`
    AnalyzeFileChanges,
    /// `get_pr_templates`
    GetPrTemplates,
    /// `suggest_template`
    SuggestTemplate,
    /// `get_recent_actions_events`
    GetRecentActionsEvents,
    /// `get_workflow_status`
    GetWorkflowStatus,
}

impl ToolName {
    /// Every tool, in listing order
    pub const ALL: [Self; 5] = [
        Self::AnalyzeFileChanges,
        Self::GetPrTemplates,
        Self::SuggestTemplate,
        Self::GetRecentActionsEvents,
        Self::GetWorkflowStatus,
    ];

    /// Registered name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AnalyzeFileChanges => "analyze_file_changes",
            Self::GetPrTemplates => "get_pr_templates",
            Self::SuggestTemplate => "suggest_template",
            Self::GetRecentActionsEvents => "get_recent_actions_events",
            Self::GetWorkflowStatus => "get_workflow_status",
        }
    }

    /// Look up a tool by registered name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// Shared, read-only state every tool call runs against
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// PR template directory
    pub templates: TemplateStore,
    /// Webhook event log
    pub events: EventLog,
    /// Caller-declared repository root
    pub workspace: Option<PathBuf>,
}

impl ToolContext {
    /// Create a context
    #[must_use]
    pub fn new(templates: TemplateStore, events: EventLog, workspace: Option<PathBuf>) -> Self {
        Self {
            templates,
            events,
            workspace,
        }
    }
}

/// Invoke a tool with keyword arguments and render its JSON response
///
/// Errors are rendered too, so this never fails.
#[must_use]
pub fn call_tool(ctx: &ToolContext, tool: ToolName, args: Option<Map<String, Value>>) -> String {
    debug!(tool = tool.as_str(), "Handling tool call");

    let result = match tool {
        ToolName::AnalyzeFileChanges => {
            handle_analyze_file_changes(args, ctx.workspace.as_deref()).and_then(to_value)
        }
        ToolName::GetPrTemplates => handle_get_pr_templates(&ctx.templates).and_then(to_value),
        ToolName::SuggestTemplate => handle_suggest_template(&ctx.templates, args).and_then(to_value),
        ToolName::GetRecentActionsEvents => {
            handle_get_recent_actions_events(&ctx.events, args).and_then(to_value)
        }
        ToolName::GetWorkflowStatus => {
            handle_get_workflow_status(&ctx.events, args).and_then(to_value)
        }
    };

    let value = result.unwrap_or_else(|err| {
        warn!(tool = tool.as_str(), error = %err, "Tool call failed");
        err.to_json()
    });
    render(&value)
}

fn to_value<T: Serialize>(output: T) -> Result<Value, HandlerError> {
    Ok(serde_json::to_value(output)?)
}

fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

// ============================================================================
// Handler Functions
// ============================================================================

/// Parse input from MCP arguments into a typed struct
fn parse_input<T: for<'de> Deserialize<'de>>(
    args: Option<Map<String, Value>>,
) -> Result<T, HandlerError> {
    let value = args
        .map(Value::Object)
        .unwrap_or(Value::Object(serde_json::Map::new()));
    serde_json::from_value(value).map_err(|e| HandlerError::InvalidInput(e.to_string()))
}

/// Handle the analyze_file_changes tool
///
/// Diffs the resolved working directory against the base branch.
pub fn handle_analyze_file_changes(
    args: Option<Map<String, Value>>,
    workspace: Option<&Path>,
) -> Result<ChangeReport, HandlerError> {
    let input: AnalyzeFileChangesInput = parse_input(args)?;
    let cwd = resolve_working_directory(workspace).map_err(HandlerError::WorkingDirectory)?;
    let repo = GitRepo::discover(&cwd)?;

    Ok(repo.analyze(&input.into())?)
}

/// Handle the get_pr_templates tool
pub fn handle_get_pr_templates(store: &TemplateStore) -> Result<Vec<Template>, HandlerError> {
    Ok(store.list()?)
}

/// Handle the suggest_template tool
///
/// Maps the caller's change type to a template, falling back to the default
/// with an explanation when it is not recognised.
pub fn handle_suggest_template(
    store: &TemplateStore,
    args: Option<Map<String, Value>>,
) -> Result<Recommendation, HandlerError> {
    let input: SuggestTemplateInput = parse_input(args)?;
    Ok(store.recommend(&input.changes_summary, &input.change_type)?)
}

/// Handle the get_recent_actions_events tool
pub fn handle_get_recent_actions_events(
    log: &EventLog,
    args: Option<Map<String, Value>>,
) -> Result<Vec<CiEvent>, HandlerError> {
    let input: RecentEventsInput = parse_input(args)?;
    Ok(log.recent(input.limit)?)
}

/// Handle the get_workflow_status tool
///
/// Returns the latest status per workflow name, optionally for one workflow.
pub fn handle_get_workflow_status(
    log: &EventLog,
    args: Option<Map<String, Value>>,
) -> Result<Vec<WorkflowStatus>, HandlerError> {
    let input: WorkflowStatusInput = parse_input(args)?;
    let events = log.read_all()?;
    Ok(latest_per_workflow(
        &events,
        input.workflow_name.as_deref(),
    ))
}

// ============================================================================
// Tests
// ============================================================================
