//! MCP (Model Context Protocol) client for the toki data tools.
//!
//! This crate speaks JSON-RPC 2.0 over HTTP POST to a local MCP endpoint,
//! covering the two methods the toki CLIs need: `tools/list` and
//! `tools/call`.
//!
//! # Architecture
//!
//! - **types**: JSON-RPC 2.0 and MCP-specific protocol types
//! - **client**: HTTP client that unwraps the response envelopes
//! - **error**: Unified error types, split into transport and protocol kinds
//!
//! # Usage
//!
//! ```no_run
//! use toki_mcp::McpClient;
//!
//! # async fn example() {
//! let client = McpClient::new("http://127.0.0.1:5001/mcp/firestore");
//! let tools = client.list_tools().await.unwrap();
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::McpClient;
pub use error::McpError;
pub use types::*;
