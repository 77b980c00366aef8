// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for pr-agent-git

use thiserror::Error;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// A base reference that git would read as an option, or an empty one
    #[error("Invalid base reference: '{reference}'")]
    InvalidReference {
        /// The rejected reference
        reference: String,
    },

    /// The `git` binary could not be started
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        /// The command line that was attempted
        command: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The `git` binary exited with a non-zero status
    #[error("Git error: `{command}` exited with status {}", exit_code(.status))]
    CommandFailed {
        /// The command line that failed
        command: String,
        /// Exit code, if the process was not killed by a signal
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },
}

fn exit_code(status: &Option<i32>) -> String {
    status.map_or_else(|| "unknown".to_string(), |code| code.to_string())
}

impl GitError {
    /// Diagnostic output attached to the error, if any
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => Some(stderr.trim()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message() {
        let err = GitError::CommandFailed {
            command: "git diff --name-status nope".to_string(),
            status: Some(128),
            stderr: "fatal: bad revision 'nope'\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Git error: `git diff --name-status nope` exited with status 128"
        );
        assert_eq!(err.details(), Some("fatal: bad revision 'nope'"));
    }

    #[test]
    fn test_signal_exit_reports_unknown() {
        let err = GitError::CommandFailed {
            command: "git diff main".to_string(),
            status: None,
            stderr: String::new(),
        };
        assert!(err.to_string().ends_with("status unknown"));
    }

    #[test]
    fn test_repository_not_found_has_no_details() {
        let err = GitError::RepositoryNotFound {
            path: "/tmp/nowhere".to_string(),
        };
        assert_eq!(err.to_string(), "Repository not found: /tmp/nowhere");
        assert!(err.details().is_none());
    }
}
