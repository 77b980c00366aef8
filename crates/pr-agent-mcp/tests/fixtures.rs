// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test fixtures for pr-agent-mcp integration tests
//!
//! This module provides helper functions for populating template directories
//! and event logs with sample data.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

// ============================================================================
// Template Fixtures
// ============================================================================

/// The stock templates shipped in the repository's `templates/` directory
pub fn shipped_templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .expect("Could not find workspace root")
        .join("templates")
}

/// Stock template filenames, in listing order
pub const STOCK_TEMPLATES: [&str; 7] = [
    "bug.md",
    "feature.md",
    "docs.md",
    "refactor.md",
    "test.md",
    "performance.md",
    "security.md",
];

/// Write one small template per stock filename into `dir`
///
/// Each file's content is `# <filename>` so tests can tell them apart.
pub fn write_stock_templates(dir: &Path) {
    fs::create_dir_all(dir).expect("Failed to create template dir");
    for name in STOCK_TEMPLATES {
        fs::write(dir.join(name), format!("# {name}\n")).expect("Failed to write template");
    }
}

// ============================================================================
// Event Log Fixtures
// ============================================================================

/// A workflow run event
pub fn workflow_run(
    name: &str,
    run_id: u64,
    status: &str,
    conclusion: Option<&str>,
    updated_at: &str,
) -> Value {
    let action = if status == "completed" {
        "completed"
    } else {
        "requested"
    };
    json!({
        "event": "workflow_run",
        "action": action,
        "workflow_name": name,
        "run_id": run_id,
        "status": status,
        "conclusion": conclusion,
        "updated_at": updated_at,
        "html_url": format!("https://github.com/example/repo/actions/runs/{run_id}")
    })
}

/// A mixed event log: pushes, check runs, and a few workflow runs
pub fn sample_events() -> Value {
    json!([
        {"event": "push", "ref": "refs/heads/feature/login", "timestamp": "2024-05-01T09:00:00Z"},
        workflow_run("CI", 1001, "in_progress", None, "2024-05-01T09:01:00Z"),
        {"event": "check_run", "name": "clippy", "status": "completed", "conclusion": "success"},
        workflow_run("CI", 1001, "completed", Some("failure"), "2024-05-01T09:07:00Z"),
        workflow_run("Docs", 1002, "completed", Some("success"), "2024-05-01T09:03:00Z"),
        {"event": "pull_request", "action": "synchronize", "number": 42},
        workflow_run("CI", 1003, "completed", Some("success"), "2024-05-01T10:15:00Z")
    ])
}

/// Write a JSON value as the event log at `path`
pub fn write_events(path: &Path, events: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create events dir");
    }
    fs::write(path, serde_json::to_string_pretty(events).expect("serialize events"))
        .expect("Failed to write events");
}
