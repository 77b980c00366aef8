// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for git output post-processing
//!
//! Exercises `parse_name_status` and `truncate_diff` with arbitrary text.

#![no_main]

use libfuzzer_sys::fuzz_target;

use pr_agent_git::{parse_name_status, truncate_diff};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse_name_status(input);

        let limit = data.first().copied().unwrap_or(0) as usize;
        let excerpt = truncate_diff(input, limit);
        assert_eq!(excerpt.truncated, excerpt.total_lines > limit);
    }
});
