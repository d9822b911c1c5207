//! `toki tools`: list the tools an MCP endpoint exposes.

use anyhow::{Context, Result};
use toki_mcp::McpClient;

use crate::terminal::Terminal;

pub async fn list(client: &McpClient, terminal: &Terminal) -> Result<()> {
    terminal.print_header("Fetching available MCP tools...")?;

    let result = client.list_tools().await.context("failed to list tools")?;

    terminal.print_info(&format!("\nFound {} tools:\n", result.tools.len()))?;
    for tool in &result.tools {
        // Descriptions can span many lines; show only the first.
        let summary = tool.description.lines().next().unwrap_or("");
        let detail = (!summary.is_empty()).then_some(summary);
        terminal.print_item(&tool.name, detail)?;
    }
    Ok(())
}
