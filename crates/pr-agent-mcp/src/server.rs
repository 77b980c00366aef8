// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! MCP server implementation for pr-agent-mcp
//!
//! This module provides the MCP server that exposes git change analysis, PR
//! templates and GitHub Actions status as MCP tools, plus four canned prompts.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_mcp_sdk::McpServer;
use rust_mcp_sdk::mcp_server::{
    McpServerOptions, ServerHandler, ServerRuntime, ToMcpServerHandler, server_runtime,
};
use rust_mcp_sdk::schema::{
    CallToolRequestParams, CallToolResult, ContentBlock, GetPromptRequestParams, GetPromptResult,
    Implementation, InitializeResult, LATEST_PROTOCOL_VERSION, ListPromptsResult, ListToolsResult,
    PaginatedRequestParams, Prompt, PromptMessage, Role, RpcError, ServerCapabilities,
    ServerCapabilitiesPrompts, ServerCapabilitiesTools, TextContent, Tool, ToolInputSchema,
    schema_utils::CallToolError,
};
use rust_mcp_sdk::{StdioTransport, TransportOptions};
use serde_json::{Map, Value, json};
use tracing::info;

use crate::handlers::{self, ToolContext, ToolName};
use crate::prompts::{self, PROMPTS, PromptTemplate};

/// Server name reported during initialization
pub const SERVER_NAME: &str = "pr-agent-actions";

/// Convert a JSON object into the properties format expected by ToolInputSchema.
///
/// ToolInputSchema expects `HashMap<String, Map<String, Value>>` for properties,
/// where each key maps to a JSON object describing that property's schema.
fn make_properties(json_obj: Value) -> HashMap<String, Map<String, Value>> {
    let mut properties = HashMap::new();
    if let Value::Object(obj) = json_obj {
        for (key, value) in obj {
            if let Value::Object(inner) = value {
                properties.insert(key, inner);
            }
        }
    }
    properties
}

/// The PR agent MCP server handler
///
/// All state is read-only, so calls share one context without locking.
pub struct PrAgentServer {
    ctx: Arc<ToolContext>,
}

impl PrAgentServer {
    /// Create a new server over the given tool context
    #[must_use]
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    /// Get the tool context
    #[must_use]
    pub fn context(&self) -> &ToolContext {
        &self.ctx
    }

    /// Build the list of available tools
    pub fn build_tools() -> Vec<Tool> {
        ToolName::ALL.into_iter().map(Self::tool).collect()
    }

    fn tool(name: ToolName) -> Tool {
        let (title, description, required, properties) = match name {
            ToolName::AnalyzeFileChanges => (
                "Analyze File Changes",
                "Get the full diff and list of changed files in the current git repository.",
                vec![],
                json!({
                    "base_branch": {
                        "type": "string",
                        "default": "main",
                        "description": "Base branch to compare against"
                    },
                    "include_diff": {
                        "type": "boolean",
                        "default": true,
                        "description": "Include the full diff content"
                    },
                    "max_diff_lines": {
                        "type": "integer",
                        "default": 500,
                        "description": "Maximum number of diff lines to include"
                    }
                }),
            ),
            ToolName::GetPrTemplates => (
                "PR Templates",
                "List available PR templates with their content.",
                vec![],
                json!({}),
            ),
            ToolName::SuggestTemplate => (
                "Suggest PR Template",
                "Let Claude analyze the changes and suggest the most appropriate PR template.",
                vec!["changes_summary".to_string(), "change_type".to_string()],
                json!({
                    "changes_summary": {
                        "type": "string",
                        "description": "Your analysis of what the changes do"
                    },
                    "change_type": {
                        "type": "string",
                        "description": "The type of change you've identified (bug, feature, docs, refactor, test, etc.)"
                    }
                }),
            ),
            ToolName::GetRecentActionsEvents => (
                "Recent GitHub Actions Events",
                "Get recent GitHub Actions events received via webhook.",
                vec![],
                json!({
                    "limit": {
                        "type": "integer",
                        "default": 10,
                        "description": "Maximum number of events to return"
                    }
                }),
            ),
            ToolName::GetWorkflowStatus => (
                "Workflow Status",
                "Get the current status of GitHub Actions workflows.",
                vec![],
                json!({
                    "workflow_name": {
                        "type": "string",
                        "description": "Optional specific workflow name to filter by"
                    }
                }),
            ),
        };

        Tool {
            name: name.as_str().into(),
            description: Some(description.into()),
            input_schema: ToolInputSchema::new(
                required,
                Some(make_properties(properties)),
                None,
            ),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some(title.into()),
        }
    }

    /// Build the list of available prompts
    pub fn build_prompts() -> Vec<Prompt> {
        PROMPTS.iter().map(Self::prompt).collect()
    }

    fn prompt(template: &PromptTemplate) -> Prompt {
        Prompt {
            name: template.name.into(),
            title: Some(template.title.into()),
            description: Some(template.description.into()),
            arguments: vec![],
            icons: vec![],
            meta: None,
        }
    }

    /// Server identity and capabilities sent during initialization
    #[must_use]
    pub fn server_details() -> InitializeResult {
        InitializeResult {
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("PR Agent".into()),
                description: Some(env!("CARGO_PKG_DESCRIPTION").into()),
                icons: vec![],
                website_url: None,
            },
            capabilities: ServerCapabilities {
                tools: Some(ServerCapabilitiesTools { list_changed: None }),
                prompts: Some(ServerCapabilitiesPrompts { list_changed: None }),
                ..Default::default()
            },
            instructions: Some(
                "Analyze git changes, suggest PR templates, and report GitHub Actions \
                 workflow status. Every tool returns a JSON string; failures carry an \
                 `error` key."
                    .into(),
            ),
            meta: None,
            protocol_version: LATEST_PROTOCOL_VERSION.into(),
        }
    }

    /// Serve over stdio until the client disconnects
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be created or the server
    /// terminates abnormally.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        let transport = StdioTransport::new(TransportOptions::default())
            .map_err(|e| anyhow::anyhow!("Failed to create stdio transport: {e}"))?;

        let server: Arc<ServerRuntime> = server_runtime::create_server(McpServerOptions {
            server_details: Self::server_details(),
            transport,
            handler: self.to_mcp_server_handler(),
            task_store: None,
            client_task_store: None,
        });

        info!(name = SERVER_NAME, "MCP server listening on stdio");
        server
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))
    }
}

/// ServerHandler implementation for the MCP protocol
#[async_trait]
impl ServerHandler for PrAgentServer {
    /// Handle requests to list available tools
    async fn handle_list_tools_request(
        &self,
        _params: Option<PaginatedRequestParams>,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: Self::build_tools(),
            meta: None,
            next_cursor: None,
        })
    }

    /// Handle requests to call a specific tool
    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<CallToolResult, CallToolError> {
        tracing::debug!(tool = %params.name, "Calling tool");

        let Some(tool) = ToolName::from_name(&params.name) else {
            return Err(CallToolError::unknown_tool(&params.name));
        };

        let ctx = Arc::clone(&self.ctx);
        let args = params.arguments;
        let response = tokio::task::spawn_blocking(move || handlers::call_tool(&ctx, tool, args))
            .await
            .unwrap_or_else(|e| {
                json!({ "error": format!("Tool '{}' did not complete: {e}", tool.as_str()) })
                    .to_string()
            });

        Ok(CallToolResult::text_content(vec![TextContent::new(
            response, None, None,
        )]))
    }

    /// Handle requests to list available prompts
    async fn handle_list_prompts_request(
        &self,
        _params: Option<PaginatedRequestParams>,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<ListPromptsResult, RpcError> {
        Ok(ListPromptsResult {
            prompts: Self::build_prompts(),
            meta: None,
            next_cursor: None,
        })
    }

    /// Handle requests to render a prompt
    async fn handle_get_prompt_request(
        &self,
        params: GetPromptRequestParams,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<GetPromptResult, RpcError> {
        let template = prompts::find_prompt(&params.name).ok_or_else(|| {
            RpcError::invalid_params().with_message(format!("Unknown prompt: {}", params.name))
        })?;

        Ok(GetPromptResult {
            description: Some(template.description.into()),
            messages: vec![PromptMessage {
                role: Role::User,
                content: ContentBlock::TextContent(TextContent::new(
                    template.text.into(),
                    None,
                    None,
                )),
            }],
            meta: None,
        })
    }
}
