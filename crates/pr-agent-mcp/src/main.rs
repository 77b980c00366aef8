//! pr-agent-mcp: MCP server for PR preparation and CI/CD awareness
//!
//! This binary serves git change analysis, PR template suggestions and
//! GitHub Actions workflow status to an AI assistant over MCP stdio, or runs a
//! single tool from the command line.

use anyhow::{Context, bail};
use clap::Parser;
use serde_json::Value;
use tracing::info;

use pr_agent_mcp::config::{Command, Config};
use pr_agent_mcp::handlers::{self, ToolName};
use pr_agent_mcp::prompts;
use pr_agent_mcp::server::PrAgentServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the MCP transport
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate()?;
    let ctx = config.tool_context();

    match &config.command {
        None => {
            info!(
                templates = %ctx.templates.dir().display(),
                events = %ctx.events.path().display(),
                "Starting pr-agent-mcp server..."
            );
            info!("Run the webhook receiver separately to record GitHub events");
            PrAgentServer::new(ctx).serve_stdio().await
        }
        Some(Command::Call { tool, args }) => {
            let Some(tool) = ToolName::from_name(tool) else {
                bail!("Unknown tool: {tool}");
            };
            let args = match args.as_deref() {
                Some(raw) => match serde_json::from_str::<Value>(raw)
                    .context("--args must be valid JSON")?
                {
                    Value::Object(map) => Some(map),
                    _ => bail!("--args must be a JSON object"),
                },
                None => None,
            };
            let response = tokio::task::spawn_blocking(move || handlers::call_tool(&ctx, tool, args))
                .await
                .context("tool call panicked")?;
            println!("{response}");
            Ok(())
        }
        Some(Command::Prompt { name }) => {
            let prompt = prompts::find_prompt(name)
                .with_context(|| format!("Unknown prompt: {name}"))?;
            println!("{}", prompt.text);
            Ok(())
        }
    }
}
