// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for pr-agent-actions

use thiserror::Error;

/// Errors that can occur while reading the event log
#[derive(Debug, Error)]
pub enum ActionsError {
    /// Error parsing JSON
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Error reading the event log file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Well-formed JSON that is not an array of event objects
    #[error("Invalid event log format: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },
}
