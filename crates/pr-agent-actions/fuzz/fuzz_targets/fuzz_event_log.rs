// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for event log parsing
//!
//! A log being rewritten by the webhook receiver can be read in any state, so
//! `parse_events` and the status reduction must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use pr_agent_actions::{latest_per_workflow, parse_events};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(events) = parse_events(input) {
            let _ = latest_per_workflow(&events, None);
        }
    }
});
