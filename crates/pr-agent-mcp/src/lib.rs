//! pr-agent-mcp library
//!
//! This module exports the core functionality of pr-agent-mcp for use in
//! integration tests and as a library.

pub mod config;
pub mod handlers;
pub mod prompts;
pub mod server;
pub mod templates;
