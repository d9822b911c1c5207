//! MCP client implementation.
//!
//! Sends JSON-RPC 2.0 requests to an MCP endpoint over HTTP POST and
//! unwraps the two envelopes every reply is nested in: the JSON-RPC
//! `result`/`error` envelope, and for tool calls the MCP `content`
//! envelope whose `text` blocks carry JSON payloads.

use serde_json::Value;

use crate::error::McpError;
use crate::types::*;

/// An MCP client bound to a single HTTP endpoint.
pub struct McpClient {
    endpoint: String,
    http: reqwest::Client,
}

impl McpClient {
    /// Create a client for the given endpoint URL.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// The endpoint URL this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a JSON-RPC request and unwrap the response envelope.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, McpError> {
        let request = JsonRpcRequest::new(RpcId::Number(1), method, Some(params));

        tracing::debug!(method = %method, endpoint = %self.endpoint, "Sending request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        if body.is_empty() {
            return Err(McpError::EmptyResponse(self.endpoint.clone()));
        }

        let response: JsonRpcResponse = serde_json::from_str(&body)?;
        unwrap_envelope(response)
    }

    /// List the tools the server exposes.
    pub async fn list_tools(&self) -> Result<ListToolsResult, McpError> {
        let result = self.request("tools/list", serde_json::json!({})).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Call a tool and return its raw MCP result.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<CallToolResult, McpError> {
        let params = serde_json::to_value(CallToolParams {
            name: name.to_string(),
            arguments,
        })?;
        let result = self.request("tools/call", params).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Call a tool and return the JSON payload carried in its first text
    /// content block. Falls back to the raw result when the tool returned
    /// no text content.
    pub async fn call_tool_payload(&self, name: &str, arguments: Value) -> Result<Value, McpError> {
        let result = self.call_tool(name, arguments).await?;
        extract_payload(result)
    }
}

/// Unwrap a JSON-RPC response into its result, or surface its error.
fn unwrap_envelope(response: JsonRpcResponse) -> Result<Value, McpError> {
    if let Some(result) = response.result {
        return Ok(result);
    }
    if let Some(err) = response.error {
        return Err(McpError::Rpc {
            code: err.code,
            message: err.message,
        });
    }
    Err(McpError::MissingResult)
}

/// Extract the JSON payload from a tool result's first text content block.
fn extract_payload(result: CallToolResult) -> Result<Value, McpError> {
    match result.content.first() {
        Some(ToolContent::Text { text }) => Ok(serde_json::from_str(text)?),
        None => Ok(serde_json::to_value(&result)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_envelope_success() {
        let resp = JsonRpcResponse::success(RpcId::Number(1), serde_json::json!({"tools": []}));
        let result = unwrap_envelope(resp).unwrap();
        assert_eq!(result, serde_json::json!({"tools": []}));
    }

    #[test]
    fn test_unwrap_envelope_error() {
        let resp = JsonRpcResponse::error(RpcId::Number(1), error_codes::INVALID_PARAMS, "bad args");
        match unwrap_envelope(resp) {
            Err(McpError::Rpc { code, message }) => {
                assert_eq!(code, error_codes::INVALID_PARAMS);
                assert_eq!(message, "bad args");
            }
            other => panic!("expected Rpc error, got {:?}", other),
        }
    }

    #[test]
    fn test_unwrap_envelope_missing_result() {
        let resp = JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: RpcId::Number(1),
            result: None,
            error: None,
        };
        assert!(matches!(unwrap_envelope(resp), Err(McpError::MissingResult)));
    }

    #[test]
    fn test_extract_payload_text() {
        let result = CallToolResult {
            content: vec![ToolContent::Text {
                text: r#"{"rows": 3}"#.to_string(),
            }],
            is_error: false,
        };
        let payload = extract_payload(result).unwrap();
        assert_eq!(payload, serde_json::json!({"rows": 3}));
    }

    #[test]
    fn test_extract_payload_no_content() {
        let result = CallToolResult {
            content: vec![],
            is_error: false,
        };
        let payload = extract_payload(result).unwrap();
        assert_eq!(payload, serde_json::json!({"content": []}));
    }

    #[test]
    fn test_extract_payload_invalid_json() {
        let result = CallToolResult {
            content: vec![ToolContent::Text {
                text: "not json".to_string(),
            }],
            is_error: false,
        };
        assert!(matches!(extract_payload(result), Err(McpError::JsonParse(_))));
    }

    #[test]
    fn test_endpoint_trailing_slash_stripped() {
        let client = McpClient::new("http://127.0.0.1:5001/mcp/firestore/");
        assert_eq!(client.endpoint(), "http://127.0.0.1:5001/mcp/firestore");
    }
}
