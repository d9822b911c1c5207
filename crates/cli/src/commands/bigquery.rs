//! `toki bigquery`: SQL export, table listing, and export download.

use anyhow::{Context, Result};
use futures::StreamExt;
use serde_json::{json, Value};
use tokio::io::AsyncWriteExt;

use toki_mcp::{McpClient, ToolContent};

use crate::terminal::Terminal;

/// Execute a SQL query and export the results.
pub async fn query(client: &McpClient, terminal: &Terminal, sql: &str, format: &str) -> Result<()> {
    terminal.print_header(&format!("Exporting query results ({})", format))?;

    let payload = client
        .call_tool_payload(
            "export_bigquery_data",
            json!({ "sql": sql, "format": format }),
        )
        .await
        .context("export failed")?;

    terminal.print_json(&payload)?;

    // Successful exports carry a download URL and summary fields.
    if payload.get("success").and_then(Value::as_bool).unwrap_or(false) {
        if let Some(url) = payload.get("download_url").and_then(Value::as_str) {
            terminal.print_info(&format!("\nExport ready: {}", url))?;
            if let Some(rows) = payload.get("row_count") {
                terminal.print_dim(&format!("  Rows: {}", rows))?;
            }
            if let Some(size) = payload.get("file_size_bytes") {
                terminal.print_dim(&format!("  Size: {} bytes", size))?;
            }
        }
    }
    Ok(())
}

/// List available tables.
pub async fn tables(client: &McpClient, terminal: &Terminal) -> Result<()> {
    terminal.print_header("Fetching BigQuery tables...")?;

    let result = client
        .call_tool("list_bq_tables_sample", json!({}))
        .await
        .context("failed to list tables")?;

    if result.content.is_empty() {
        terminal.print_json(&serde_json::to_value(&result)?)?;
    } else {
        for block in &result.content {
            let ToolContent::Text { text } = block;
            terminal.print_plain(text)?;
        }
    }
    Ok(())
}

/// Stream an exported file to disk.
pub async fn download(terminal: &Terminal, url: &str, output: Option<&str>) -> Result<()> {
    let filename = match output {
        Some(name) => name.to_string(),
        None => url
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("export.out")
            .to_string(),
    };

    let response = reqwest::get(url)
        .await
        .context("download request failed")?
        .error_for_status()
        .context("server rejected download")?;

    let mut file = tokio::fs::File::create(&filename)
        .await
        .with_context(|| format!("failed to create {}", filename))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("download interrupted")?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    terminal.print_info(&format!("Downloaded to: {}", filename))?;
    Ok(())
}
