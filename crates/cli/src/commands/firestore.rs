//! `toki firestore`: document get/add, collection query and listing.
//!
//! Responses carry Firestore's tagged field values; everything shown to
//! the user goes through the `toki-firestore` codec first.

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

use toki_firestore::{decode_document, document_path, encode_fields, parse_filter};
use toki_mcp::McpClient;

use crate::terminal::Terminal;

/// Get documents by their paths.
pub async fn get(client: &McpClient, terminal: &Terminal, paths: &[String]) -> Result<()> {
    terminal.print_header(&format!("Getting {} document(s)...", paths.len()))?;

    let payload = client
        .call_tool_payload("firestore_get_documents", json!({ "paths": paths }))
        .await
        .context("failed to get documents")?;

    render_documents(terminal, &payload)
}

/// Add a document to a collection.
pub async fn add(
    client: &McpClient,
    terminal: &Terminal,
    collection: &str,
    data: &str,
    id: Option<&str>,
) -> Result<()> {
    let data: Value = serde_json::from_str(data).context("invalid JSON data")?;
    let Some(fields) = data.as_object() else {
        bail!("document data must be a JSON object");
    };

    terminal.print_header(&format!("Adding document to collection: {}", collection))?;
    if let Some(id) = id {
        terminal.print_dim(&format!("Document ID: {}", id))?;
    }

    let mut document = json!({
        "collectionId": collection,
        "documentData": encode_fields(fields),
    });
    if let Some(id) = id {
        document["documentId"] = json!(id);
    }

    let payload = client
        .call_tool_payload("firestore_add_documents", json!({ "documents": [document] }))
        .await
        .context("failed to add document")?;

    match payload.as_array().and_then(|docs| docs.first()) {
        Some(doc) => {
            terminal.print_info("Document created")?;
            match doc.get("name").and_then(Value::as_str) {
                Some(name) => terminal.print_info(&format!("Path: {}", document_path(name)))?,
                None => terminal.print_json(doc)?,
            }
        }
        None => terminal.print_json(&payload)?,
    }
    Ok(())
}

/// Query a collection with an optional EQUAL filter.
pub async fn query(
    client: &McpClient,
    terminal: &Terminal,
    collection: &str,
    filter: Option<&str>,
    limit: Option<u64>,
) -> Result<()> {
    let mut title = format!("Querying collection: {}", collection);
    if let Some(raw) = filter {
        title.push_str(&format!(" (where {})", raw));
    }
    if let Some(limit) = limit {
        title.push_str(&format!(" (limit {})", limit));
    }
    terminal.print_header(&title)?;

    let mut args = json!({ "collectionId": collection });
    if let Some(raw) = filter {
        args["where"] = parse_filter(raw)?;
    }
    if let Some(limit) = limit {
        args["limit"] = json!(limit);
    }

    let payload = client
        .call_tool_payload("firestore_query_collection", args)
        .await
        .context("query failed")?;

    render_documents(terminal, &payload)
}

/// List collections, optionally under a parent document.
pub async fn collections(
    client: &McpClient,
    terminal: &Terminal,
    parent: Option<&str>,
) -> Result<()> {
    match parent {
        Some(parent) => terminal.print_header(&format!("Listing collections under: {}", parent))?,
        None => terminal.print_header("Listing root collections...")?,
    }

    let mut args = json!({});
    if let Some(parent) = parent {
        args["parent"] = json!(parent);
    }

    let payload = client
        .call_tool_payload("firestore_list_collections", args)
        .await
        .context("failed to list collections")?;

    match payload.as_array() {
        Some(collections) => {
            terminal.print_info(&format!("\nFound {} collections:", collections.len()))?;
            for coll in collections {
                match coll.as_str() {
                    Some(name) => terminal.print_plain(&format!("  - {}", name))?,
                    None => terminal.print_plain(&format!("  - {}", coll))?,
                }
            }
        }
        None => terminal.print_json(&payload)?,
    }
    Ok(())
}

/// Render a document list payload: either a bare array of documents or a
/// `{"documents": [...]}` wrapper. Anything else is printed raw.
fn render_documents(terminal: &Terminal, payload: &Value) -> Result<()> {
    let docs: &[Value] = if let Some(docs) = payload.as_array() {
        docs
    } else if let Some(docs) = payload.get("documents").and_then(Value::as_array) {
        docs
    } else {
        return terminal.print_json(payload);
    };

    terminal.print_info(&format!("\nFound {} document(s):", docs.len()))?;
    for doc in docs {
        match doc.get("name").and_then(Value::as_str) {
            Some(name) => {
                let fields = decode_document(doc).context("failed to decode document")?;
                terminal.print_document(document_path(name), &fields)?;
            }
            None => terminal.print_json(doc)?,
        }
    }
    Ok(())
}
