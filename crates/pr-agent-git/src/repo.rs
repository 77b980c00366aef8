// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository discovery and `git` subprocess invocation
//!
//! Discovery uses the `git2` crate so that a directory nested inside a work
//! tree resolves to the work tree root. The actual diff queries are delegated
//! to the `git` binary so their output matches what a developer sees locally.

use crate::changes::{AnalyzeOptions, ChangeReport, parse_name_status, truncate_diff};
use crate::error::GitError;
use git2::Repository;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Resolve the directory git commands should run in
///
/// A caller-declared root wins. Otherwise the process's current directory is
/// used.
///
/// # Errors
///
/// Returns an I/O error if no root was declared and the current directory
/// cannot be determined.
pub fn resolve_working_directory(declared: Option<&Path>) -> std::io::Result<PathBuf> {
    match declared {
        Some(root) => Ok(root.to_path_buf()),
        None => std::env::current_dir(),
    }
}

/// Reject references git would parse as an option
///
/// Every query calls this before a ref reaches the command line.
fn check_reference(reference: &str) -> Result<(), GitError> {
    if reference.trim().is_empty() || reference.starts_with('-') {
        return Err(GitError::InvalidReference {
            reference: reference.to_string(),
        });
    }
    Ok(())
}

/// A git work tree that diff queries run against
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Discover the work tree containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found or the
    /// repository is bare.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let not_found = || GitError::RepositoryNotFound {
            path: path.display().to_string(),
        };
        let repo = Repository::discover(path).map_err(|_| not_found())?;
        let root = repo.workdir().ok_or_else(not_found)?.to_path_buf();
        debug!(root = %root.display(), "Discovered git work tree");
        Ok(Self { root })
    }

    /// Get the work tree root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run `git` with the given arguments in the work tree and capture stdout
    ///
    /// # Errors
    ///
    /// Returns `GitError::Spawn` if the binary cannot be started and
    /// `GitError::CommandFailed` (with captured stderr) on a non-zero exit.
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, cwd = %self.root.display(), "Running git");

        let output = Command::new("git")
            .current_dir(&self.root)
            .args(args)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Paths changed relative to `base`, with status codes discarded
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` for a reference starting with `-`,
    /// or `GitError` if `git diff --name-status` fails.
    pub fn changed_files(&self, base: &str) -> Result<Vec<String>, GitError> {
        check_reference(base)?;
        let output = self.run(&["diff", "--name-status", base])?;
        Ok(parse_name_status(&output))
    }

    /// Unified diff of the work tree against `base`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if `git diff` fails.
    pub fn diff(&self, base: &str) -> Result<String, GitError> {
        check_reference(base)?;
        self.run(&["diff", base])
    }

    /// Per-file insertion/deletion summary against `base`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if `git diff --stat` fails.
    pub fn diff_stat(&self, base: &str) -> Result<String, GitError> {
        check_reference(base)?;
        self.run(&["diff", "--stat", base])
    }

    /// One-line summaries of commits reachable from HEAD but not from `base`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if `git log` fails.
    pub fn commits_since(&self, base: &str) -> Result<String, GitError> {
        check_reference(base)?;
        let range = format!("{base}..HEAD");
        self.run(&["log", "--oneline", &range])
    }

    /// Build a [`ChangeReport`] against the configured base reference
    ///
    /// # Errors
    ///
    /// Returns the first `GitError` raised by any of the underlying git
    /// invocations.
    pub fn analyze(&self, options: &AnalyzeOptions) -> Result<ChangeReport, GitError> {
        let base = options.base_branch.as_str();
        let files_changed = self.changed_files(base)?;
        let statistics = self.diff_stat(base)?;
        let commits = self.commits_since(base)?;

        let excerpt = if options.include_diff {
            Some(truncate_diff(&self.diff(base)?, options.max_diff_lines))
        } else {
            None
        };

        debug!(
            base,
            files = files_changed.len(),
            truncated = excerpt.as_ref().is_some_and(|e| e.truncated),
            "Analyzed changes"
        );

        Ok(ChangeReport::new(
            base,
            &self.root,
            files_changed,
            statistics,
            commits,
            excerpt,
            options.max_diff_lines,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_declared_root() {
        let declared = PathBuf::from("/declared/root");
        let resolved = resolve_working_directory(Some(&declared)).expect("resolve");
        assert_eq!(resolved, declared);
    }

    #[test]
    fn test_resolve_falls_back_to_current_dir() {
        let resolved = resolve_working_directory(None).expect("resolve");
        assert_eq!(resolved, std::env::current_dir().expect("cwd"));
    }

    #[test]
    fn test_check_reference() {
        assert!(check_reference("main").is_ok());
        assert!(check_reference("origin/feature-x").is_ok());
        assert!(check_reference("HEAD~2").is_ok());
        for bad in ["", "  ", "-p", "--output=/tmp/x"] {
            assert!(
                matches!(check_reference(bad), Err(GitError::InvalidReference { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_discover_outside_repository() {
        let path = std::env::temp_dir().join("pr-agent-git-definitely-not-a-repo-0");
        let result = GitRepo::discover(&path);
        assert!(matches!(result, Err(GitError::RepositoryNotFound { .. })));
    }
}
