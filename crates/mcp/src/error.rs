//! Error types for the MCP crate.
//!
//! Errors fall into two categories: transport errors (the HTTP round trip
//! itself failed) and protocol errors (the server answered, but the
//! JSON-RPC envelope carried an error or was malformed).

/// Errors that can occur during MCP operations.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    /// The HTTP request failed (connection refused, non-2xx status, ...).
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an empty body.
    #[error("empty response from {0}")]
    EmptyResponse(String),

    /// Failed to parse JSON from the response.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The server returned a JSON-RPC error object.
    #[error("MCP error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response envelope had neither `result` nor `error`.
    #[error("unexpected response: neither result nor error present")]
    MissingResult,
}

impl McpError {
    /// Whether this error happened before a well-formed JSON-RPC response
    /// was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, McpError::Http(_) | McpError::EmptyResponse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_error_is_protocol() {
        let err = McpError::Rpc {
            code: -32601,
            message: "Method not found".to_string(),
        };
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "MCP error -32601: Method not found");
    }

    #[test]
    fn test_empty_response_is_transport() {
        let err = McpError::EmptyResponse("http://127.0.0.1:5001/mcp/default".to_string());
        assert!(err.is_transport());
    }
}
