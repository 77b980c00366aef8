// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! pr-agent-git: Git change analysis for pr-agent-mcp
//!
//! This library crate inspects the changes in a working tree relative to a
//! base reference by shelling out to the `git` binary, and packages the
//! result as a [`ChangeReport`] for consumption by the pr-agent-mcp server.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use pr_agent_git::{AnalyzeOptions, GitRepo, resolve_working_directory};
//!
//! let cwd = resolve_working_directory(None).expect("current dir");
//! let repo = GitRepo::discover(&cwd).expect("open repo");
//! let report = repo.analyze(&AnalyzeOptions::against("main")).expect("analyze");
//!
//! println!("{} files changed", report.num_files_changed);
//! ```

pub mod changes;
pub mod error;
pub mod repo;

pub use changes::{AnalyzeOptions, ChangeReport, DiffExcerpt, parse_name_status, truncate_diff};
pub use error::GitError;
pub use repo::{GitRepo, resolve_working_directory};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::changes::{AnalyzeOptions, ChangeReport};
    pub use crate::error::GitError;
    pub use crate::repo::{GitRepo, resolve_working_directory};
}
