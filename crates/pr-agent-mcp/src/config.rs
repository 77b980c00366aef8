// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the pr-agent-mcp server
//!
//! This module provides configuration types and utilities for the MCP server,
//! including template and event log locations, the workspace root, and logging
//! options.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pr_agent_actions::EventLog;

use crate::handlers::ToolContext;
use crate::templates::TemplateStore;

/// PR Agent MCP Server - git change analysis, PR templates and CI status for AI assistants
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pr-agent-mcp")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to MCP server mode)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory containing PR templates (*.md)
    ///
    /// Defaults to ~/.local/share/pr-agent/templates (or platform equivalent).
    /// Nothing populates that directory; while it is missing, ./templates is
    /// used instead (the stock templates when run from a checkout).
    #[arg(short, long, env = "PR_AGENT_TEMPLATES_DIR")]
    pub templates_dir: Option<PathBuf>,

    /// JSON file where the webhook receiver records GitHub events
    ///
    /// The file does not need to exist; a missing log reads as empty.
    /// Defaults to ~/.local/share/pr-agent/github_events.json (or platform equivalent).
    #[arg(short, long, env = "PR_AGENT_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,

    /// Repository root git commands run in
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, env = "PR_AGENT_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr to avoid interfering with MCP stdio
    /// transport.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Invoke one tool and print its JSON response
    ///
    /// Example:
    ///   pr-agent-mcp call get_workflow_status --args '{"workflow_name": "CI"}'
    Call {
        /// Tool name (e.g. analyze_file_changes)
        tool: String,

        /// Keyword arguments as a JSON object
        #[arg(long)]
        args: Option<String>,
    },

    /// Print a prompt's text
    Prompt {
        /// Prompt name (e.g. analyze_ci_results)
        name: String,
    },
}

/// Template directory relative to the working directory
const LOCAL_TEMPLATES_DIR: &str = "templates";

/// Pick the default template directory, falling back to `local` while the
/// per-user directory does not exist
fn default_templates_dir(user: PathBuf, local: PathBuf) -> PathBuf {
    if !user.is_dir() && local.is_dir() {
        return local;
    }
    user
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pr-agent")
}

impl Config {
    /// Get the template directory, using a default if not specified
    ///
    /// Default location is platform-specific:
    /// - macOS: ~/Library/Application Support/pr-agent/templates
    /// - Linux: ~/.local/share/pr-agent/templates
    /// - Windows: %LOCALAPPDATA%\pr-agent\templates
    ///
    /// When that directory does not exist and `./templates` does, the local
    /// directory is used.
    #[must_use]
    pub fn templates_path(&self) -> PathBuf {
        self.templates_dir.clone().unwrap_or_else(|| {
            default_templates_dir(
                data_dir().join("templates"),
                PathBuf::from(LOCAL_TEMPLATES_DIR),
            )
        })
    }

    /// Get the event log path, using a default if not specified
    #[must_use]
    pub fn events_path(&self) -> PathBuf {
        self.events_file
            .clone()
            .unwrap_or_else(|| data_dir().join("github_events.json"))
    }

    /// Build the shared tool context from this configuration
    #[must_use]
    pub fn tool_context(&self) -> ToolContext {
        ToolContext::new(
            TemplateStore::new(self.templates_path()),
            EventLog::new(self.events_path()),
            self.workspace.clone(),
        )
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The workspace path is specified but doesn't exist or isn't a directory
    /// - The templates path exists but isn't a directory
    /// - The events path exists but is a directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref workspace) = self.workspace {
            if !workspace.exists() {
                return Err(ConfigError::WorkspaceNotFound(workspace.clone()));
            }
            if !workspace.is_dir() {
                return Err(ConfigError::WorkspaceNotDirectory(workspace.clone()));
            }
        }

        let templates = self.templates_path();
        if templates.exists() && !templates.is_dir() {
            return Err(ConfigError::TemplatesNotDirectory(templates));
        }

        let events = self.events_path();
        if events.is_dir() {
            return Err(ConfigError::EventsFileIsDirectory(events));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Workspace path not found
    #[error("Workspace path not found: {0}")]
    WorkspaceNotFound(PathBuf),

    /// Workspace path is not a directory
    #[error("Workspace path is not a directory: {0}")]
    WorkspaceNotDirectory(PathBuf),

    /// Templates path is not a directory
    #[error("Templates path is not a directory: {0}")]
    TemplatesNotDirectory(PathBuf),

    /// Events path is a directory
    #[error("Events file path is a directory: {0}")]
    EventsFileIsDirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.command.is_none());
        assert!(config.templates_dir.is_none());
        assert!(config.events_file.is_none());
        assert!(config.workspace.is_none());
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_default_paths() {
        let config = Config::default();
        let templates = config.templates_path();
        assert!(templates.ends_with("pr-agent/templates"));
        let events = config.events_path();
        assert!(events.ends_with("pr-agent/github_events.json"));
    }

    #[test]
    fn test_default_templates_fall_back_to_local_dir() {
        let root = std::env::temp_dir().join(format!("pr-agent-config-{}", std::process::id()));
        let user = root.join("user/templates");
        let local = root.join("checkout/templates");
        std::fs::create_dir_all(&local).expect("create local dir");

        assert_eq!(default_templates_dir(user.clone(), local.clone()), local);

        std::fs::create_dir_all(&user).expect("create user dir");
        assert_eq!(default_templates_dir(user.clone(), local.clone()), user);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_default_templates_without_any_dir() {
        let user = PathBuf::from("/nonexistent/pr-agent/templates");
        let local = PathBuf::from("/nonexistent/checkout/templates");
        assert_eq!(default_templates_dir(user.clone(), local), user);
    }

    #[test]
    fn test_custom_paths() {
        let config = Config {
            templates_dir: Some(PathBuf::from("/custom/templates")),
            events_file: Some(PathBuf::from("/custom/events.json")),
            ..Default::default()
        };
        assert_eq!(config.templates_path(), PathBuf::from("/custom/templates"));
        assert_eq!(config.events_path(), PathBuf::from("/custom/events.json"));
    }

    #[test]
    fn test_tool_context_uses_config() {
        let config = Config {
            templates_dir: Some(PathBuf::from("/t")),
            events_file: Some(PathBuf::from("/e.json")),
            workspace: Some(PathBuf::from("/w")),
            ..Default::default()
        };
        let ctx = config.tool_context();
        assert_eq!(ctx.templates.dir(), PathBuf::from("/t"));
        assert_eq!(ctx.events.path(), PathBuf::from("/e.json"));
        assert_eq!(ctx.workspace, Some(PathBuf::from("/w")));
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_workspace() {
        let config = Config {
            workspace: Some(PathBuf::from("/nonexistent/path/12345")),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::WorkspaceNotFound(_))));
    }

    #[test]
    fn test_validate_valid_workspace() {
        let config = Config {
            workspace: Some(std::env::temp_dir()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_events_directory() {
        let config = Config {
            events_file: Some(std::env::temp_dir()),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::EventsFileIsDirectory(_))));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
