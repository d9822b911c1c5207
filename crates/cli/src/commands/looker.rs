//! `toki looker`: models, explores, queries, looks, and dashboards.

use anyhow::{Context, Result};
use serde_json::{json, Value};

use toki_mcp::McpClient;

use crate::terminal::Terminal;

/// Options for `toki looker query`.
pub struct QueryOpts<'a> {
    pub model: &'a str,
    pub explore: &'a str,
    pub fields: &'a str,
    pub filters: Option<&'a str>,
    pub sorts: Option<&'a str>,
    pub limit: Option<u64>,
    pub sql: bool,
    pub url: bool,
}

/// List LookML models.
pub async fn models(client: &McpClient, terminal: &Terminal) -> Result<()> {
    terminal.print_header("Fetching LookML models...")?;

    let payload = client
        .call_tool_payload("looker_get_models", json!({}))
        .await
        .context("failed to fetch models")?;

    let Some(models) = payload.as_array() else {
        return terminal.print_json(&payload);
    };

    terminal.print_info(&format!("\nFound {} models:", models.len()))?;
    for model in models {
        let name = display_name(model);
        let mut details = Vec::new();
        if let Some(label) = model.get("label").and_then(Value::as_str) {
            if label != name {
                details.push(format!("Label: {}", label));
            }
        }
        if let Some(explores) = model.get("explores").and_then(Value::as_array) {
            details.push(format!("Explores: {}", explores.len()));
        }
        let detail = (!details.is_empty()).then(|| details.join(" | "));
        terminal.print_item(name, detail.as_deref())?;
    }
    Ok(())
}

/// List explores in a model, or the fields of one explore.
pub async fn explore(
    client: &McpClient,
    terminal: &Terminal,
    model: &str,
    explore: Option<&str>,
) -> Result<()> {
    match explore {
        None => {
            terminal.print_header(&format!("Explores in model: {}", model))?;
            let payload = client
                .call_tool_payload("looker_get_explores", json!({ "model_name": model }))
                .await
                .context("failed to fetch explores")?;

            let Some(explores) = payload.as_array() else {
                return terminal.print_json(&payload);
            };
            terminal.print_info(&format!("\nFound {} explores:", explores.len()))?;
            for explore in explores {
                terminal.print_item(display_name(explore), None)?;
            }
            Ok(())
        }
        Some(explore) => {
            terminal.print_header(&format!("Fields in {}.{}", model, explore))?;
            let args = json!({ "model_name": model, "explore_name": explore });

            let dimensions = client
                .call_tool_payload("looker_get_dimensions", args.clone())
                .await
                .context("failed to fetch dimensions")?;
            print_fields(terminal, &dimensions, "Dimensions")?;

            let measures = client
                .call_tool_payload("looker_get_measures", args)
                .await
                .context("failed to fetch measures")?;
            print_fields(terminal, &measures, "Measures")
        }
    }
}

/// Run a query, or show its SQL / explore URL.
pub async fn query(client: &McpClient, terminal: &Terminal, opts: QueryOpts<'_>) -> Result<()> {
    let mut args = json!({
        "model_id": opts.model,
        "explore_name": opts.explore,
        "fields": split_list(opts.fields),
    });
    if let Some(raw) = opts.filters {
        args["filters"] = serde_json::from_str(raw).context("invalid filters JSON")?;
    }

    if opts.sql {
        terminal.print_header("Generated SQL")?;
        let payload = client
            .call_tool_payload("looker_query_sql", args)
            .await
            .context("failed to generate SQL")?;
        return print_scalar(terminal, &payload);
    }
    if opts.url {
        terminal.print_header("Looker URL")?;
        let payload = client
            .call_tool_payload("looker_query_url", args)
            .await
            .context("failed to build URL")?;
        return print_scalar(terminal, &payload);
    }

    if let Some(raw) = opts.sorts {
        args["sorts"] = json!(split_list(raw));
    }
    if let Some(limit) = opts.limit {
        args["row_limit"] = json!(limit);
    }

    terminal.print_header(&format!("Running query: {}.{}", opts.model, opts.explore))?;
    terminal.print_dim(&format!("Fields: {}", opts.fields))?;
    if let Some(filters) = opts.filters {
        terminal.print_dim(&format!("Filters: {}", filters))?;
    }

    let payload = client
        .call_tool_payload("looker_query", args)
        .await
        .context("query failed")?;
    print_rows(terminal, &payload)
}

/// List/search saved looks.
pub async fn looks_list(
    client: &McpClient,
    terminal: &Terminal,
    title: Option<&str>,
    limit: u64,
) -> Result<()> {
    terminal.print_header("Searching looks...")?;
    if let Some(title) = title {
        terminal.print_dim(&format!("Title filter: {}", title))?;
    }

    let mut args = json!({ "limit": limit });
    if let Some(title) = title {
        args["title"] = json!(title);
    }

    let payload = client
        .call_tool_payload("looker_get_looks", args)
        .await
        .context("failed to search looks")?;
    print_catalog(terminal, &payload, "looks")
}

/// Run a look and print its rows.
pub async fn looks_run(client: &McpClient, terminal: &Terminal, look_id: &str) -> Result<()> {
    terminal.print_header(&format!("Running look {}...", look_id))?;

    let payload = client
        .call_tool_payload("looker_run_look", json!({ "look_id": look_id }))
        .await
        .context("failed to run look")?;
    print_rows(terminal, &payload)
}

/// List/search dashboards.
pub async fn dashboards_list(
    client: &McpClient,
    terminal: &Terminal,
    title: Option<&str>,
    limit: u64,
) -> Result<()> {
    terminal.print_header("Searching dashboards...")?;
    if let Some(title) = title {
        terminal.print_dim(&format!("Title filter: {}", title))?;
    }

    let mut args = json!({ "limit": limit });
    if let Some(title) = title {
        args["title"] = json!(title);
    }

    let payload = client
        .call_tool_payload("looker_get_dashboards", args)
        .await
        .context("failed to search dashboards")?;
    print_catalog(terminal, &payload, "dashboards")
}

/// Create a dashboard.
pub async fn dashboards_create(
    client: &McpClient,
    terminal: &Terminal,
    title: &str,
    description: Option<&str>,
) -> Result<()> {
    terminal.print_header(&format!("Creating dashboard: {}", title))?;

    let mut args = json!({ "title": title });
    if let Some(desc) = description {
        args["description"] = json!(desc);
    }

    let payload = client
        .call_tool_payload("looker_make_dashboard", args)
        .await
        .context("failed to create dashboard")?;

    terminal.print_info("\nDashboard created:")?;
    terminal.print_json(&payload)
}

// ── Rendering helpers ───────────────────────────────────────────────

fn display_name(entry: &Value) -> &str {
    entry
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| entry.get("id").and_then(Value::as_str))
        .unwrap_or("unknown")
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Print a field listing, capped at 20 entries.
fn print_fields(terminal: &Terminal, payload: &Value, kind: &str) -> Result<()> {
    let Some(fields) = payload.as_array() else {
        return terminal.print_json(payload);
    };

    terminal.print_info(&format!("\n{} ({}):", kind, fields.len()))?;
    for field in fields.iter().take(20) {
        let mut details = Vec::new();
        if let Some(label) = field.get("label").and_then(Value::as_str) {
            details.push(label.to_string());
        }
        if let Some(ftype) = field.get("type").and_then(Value::as_str) {
            details.push(ftype.to_string());
        }
        let detail = (!details.is_empty()).then(|| details.join(" | "));
        terminal.print_item(display_name(field), detail.as_deref())?;
    }
    if fields.len() > 20 {
        terminal.print_dim(&format!("  ... and {} more", fields.len() - 20))?;
    }
    Ok(())
}

/// Print query results, showing the first 10 rows.
fn print_rows(terminal: &Terminal, payload: &Value) -> Result<()> {
    let Some(rows) = payload.as_array() else {
        return terminal.print_json(payload);
    };

    terminal.print_info(&format!("\nResults ({} rows):", rows.len()))?;
    let shown: Vec<&Value> = rows.iter().take(10).collect();
    terminal.print_json(&json!(shown))?;
    if rows.len() > 10 {
        terminal.print_dim(&format!("... and {} more rows", rows.len() - 10))?;
    }
    Ok(())
}

/// Print a look/dashboard catalog listing with id, title, and folder.
fn print_catalog(terminal: &Terminal, payload: &Value, kind: &str) -> Result<()> {
    let Some(entries) = payload.as_array() else {
        return terminal.print_json(payload);
    };

    terminal.print_info(&format!("\nFound {} {}:", entries.len(), kind))?;
    for entry in entries {
        let id = match entry.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unknown".to_string(),
        };
        let title = entry
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Untitled");
        let folder = entry
            .pointer("/folder/name")
            .and_then(Value::as_str)
            .map(|name| format!("Folder: {}", name));
        terminal.print_item(&format!("[{}] {}", id, title), folder.as_deref())?;
    }
    Ok(())
}

/// Print a payload that should be a bare string (SQL text, a URL).
fn print_scalar(terminal: &Terminal, payload: &Value) -> Result<()> {
    match payload.as_str() {
        Some(text) => terminal.print_plain(text),
        None => terminal.print_json(payload),
    }
}
