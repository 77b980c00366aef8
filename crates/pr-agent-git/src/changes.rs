// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Change report types and diff post-processing

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default base reference to compare against
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Default maximum number of diff lines returned
pub const DEFAULT_MAX_DIFF_LINES: usize = 500;

/// Configuration for a change analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Base reference (branch, tag, or SHA) to diff against
    pub base_branch: String,
    /// Include the unified diff in the report
    pub include_diff: bool,
    /// Maximum number of diff lines kept before truncating
    pub max_diff_lines: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            include_diff: true,
            max_diff_lines: DEFAULT_MAX_DIFF_LINES,
        }
    }
}

impl AnalyzeOptions {
    /// Create default options against the given base reference
    #[must_use]
    pub fn against(base: &str) -> Self {
        Self {
            base_branch: base.to_string(),
            ..Default::default()
        }
    }

    /// Skip the unified diff
    #[must_use]
    pub fn without_diff(mut self) -> Self {
        self.include_diff = false;
        self
    }

    /// Set the diff line limit
    #[must_use]
    pub fn max_lines(mut self, max: usize) -> Self {
        self.max_diff_lines = max;
        self
    }
}

/// A diff after the line limit has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffExcerpt {
    /// Diff text, with a truncation notice appended when truncated
    pub content: String,
    /// Whether lines were dropped
    pub truncated: bool,
    /// Line count of the raw diff, before truncation
    pub total_lines: usize,
}

/// Summary of the changes in a work tree relative to a base reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    /// Base reference the report was computed against
    pub base_branch: String,
    /// Directory git was run in
    pub working_directory: String,
    /// Changed paths
    pub files_changed: Vec<String>,
    /// Number of changed paths
    pub num_files_changed: usize,
    /// Output of `git diff --stat`
    pub statistics: String,
    /// Output of `git log --oneline <base>..HEAD`
    pub commits: String,
    /// Unified diff, only present when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    /// Whether the diff was truncated
    pub truncated: bool,
    /// Diff line count before truncation (0 when the diff was not requested)
    pub total_diff_lines: usize,
    /// Line limit applied to the diff, only present when the diff was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_line_limit: Option<usize>,
}

impl ChangeReport {
    pub(crate) fn new(
        base: &str,
        working_directory: &Path,
        files_changed: Vec<String>,
        statistics: String,
        commits: String,
        excerpt: Option<DiffExcerpt>,
        max_diff_lines: usize,
    ) -> Self {
        let num_files_changed = files_changed.len();
        let (diff, truncated, total_diff_lines, diff_line_limit) = match excerpt {
            Some(e) => (Some(e.content), e.truncated, e.total_lines, Some(max_diff_lines)),
            None => (None, false, 0, None),
        };

        Self {
            base_branch: base.to_string(),
            working_directory: working_directory.display().to_string(),
            files_changed,
            num_files_changed,
            statistics,
            commits,
            diff,
            truncated,
            total_diff_lines,
            diff_line_limit,
        }
    }
}

/// Recover paths from `git diff --name-status` output
///
/// Each line is `<status>\t<path>`; everything after the first tab is kept,
/// so renames keep both paths. Lines without a tab are kept whole.
#[must_use]
pub fn parse_name_status(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('\t') {
            Some((_, path)) => path.to_string(),
            None => line.to_string(),
        })
        .collect()
}

/// Apply a line limit to a unified diff
///
/// When the diff has more than `max_lines` lines only the first `max_lines`
/// are kept, unchanged, and a two-line notice is appended. Otherwise the raw
/// diff is returned byte-for-byte.
#[must_use]
pub fn truncate_diff(raw: &str, max_lines: usize) -> DiffExcerpt {
    let total_lines = raw.lines().count();

    if total_lines <= max_lines {
        return DiffExcerpt {
            content: raw.to_string(),
            truncated: false,
            total_lines,
        };
    }

    // Slice at the Nth newline so kept lines stay byte-exact (CRLF included)
    let kept = match max_lines.checked_sub(1) {
        Some(last) => raw
            .match_indices('\n')
            .nth(last)
            .map_or(raw, |(end, _)| &raw[..end]),
        None => "",
    };
    let mut content = kept.to_string();
    content.push_str(&format!(
        "\n\n... Output truncated. Showing {max_lines} of {total_lines} lines ..."
    ));
    content.push_str("\n... Use max_diff_lines parameter to see more ...");

    DiffExcerpt {
        content,
        truncated: true,
        total_lines,
    }
}
