//! JSON-RPC 2.0 protocol layer for MCP.
//!
//! Defines the wire message types and small helpers for building requests
//! and decoding response bodies. The transport only moves opaque strings;
//! everything that understands JSON-RPC lives here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Protocol version this client speaks, sent in the initialize request and
/// echoed in the `MCP-Protocol-Version` header on subsequent requests.
pub const PROTOCOL_VERSION: &str = "2025-06-18";

/// JSON-RPC 2.0 request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,
    /// Unique identifier for the request
    pub id: RequestId,
    /// Name of the method to be invoked
    pub method: String,
    /// Parameters to the method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,
    /// Identifier matching the request this is a response to
    pub id: Option<RequestId>,
    /// Result of the method call (present iff the call succeeded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error information (present iff the call failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 notification (no id, no reply expected)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,
    /// Name of the method to be invoked
    pub method: String,
    /// Parameters to the method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code (standard JSON-RPC codes or MCP-specific codes)
    pub code: i32,
    /// Brief error message
    pub message: String,
    /// Additional error information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Request ID can be a string or a number on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    /// String identifier
    String(String),
    /// Numeric identifier
    Number(i64),
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId::String(s)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        RequestId::String(uuid.to_string())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::String(s) => write!(f, "{s}"),
            RequestId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Protocol utilities
pub struct Protocol;

impl Protocol {
    /// Create a JSON-RPC request with a fresh unique id.
    pub fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Self::generate_request_id(),
            method: method.to_string(),
            params,
        }
    }

    /// Create a JSON-RPC notification.
    pub fn notification(method: &str, params: Option<Value>) -> JsonRpcNotification {
        JsonRpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        }
    }

    /// Generate a unique request ID.
    pub fn generate_request_id() -> RequestId {
        RequestId::from(Uuid::new_v4())
    }

    /// Parse a response body into a [`JsonRpcResponse`].
    ///
    /// A body that deserializes but carries neither `result` nor `error` is
    /// not a valid response and is rejected.
    pub fn parse_response(body: &str) -> Result<JsonRpcResponse> {
        let response: JsonRpcResponse = serde_json::from_str(body)?;
        if response.result.is_none() && response.error.is_none() {
            return Err(Error::Session(crate::error::SessionError::MalformedResponse(
                "response carries neither result nor error".to_string(),
            )));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_with_version_and_id() {
        let request = Protocol::request("tools/list", Some(json!({})));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "tools/list");
        assert!(value["id"].is_string());
    }

    #[test]
    fn notification_has_no_id() {
        let notification = Protocol::notification("notifications/initialized", None);
        let value = serde_json::to_value(&notification).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("params").is_none());
    }

    #[test]
    fn parse_response_accepts_result() {
        let body = r#"{"jsonrpc":"2.0","id":1,"result":{"tools":[]}}"#;
        let response = Protocol::parse_response(body).unwrap();
        assert_eq!(response.id, Some(RequestId::Number(1)));
        assert!(response.result.is_some());
        assert!(response.error.is_none());
    }

    #[test]
    fn parse_response_accepts_error() {
        let body = r#"{"jsonrpc":"2.0","id":"a","error":{"code":-32601,"message":"no such method"}}"#;
        let response = Protocol::parse_response(body).unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
    }

    #[test]
    fn parse_response_rejects_empty_body_shape() {
        let body = r#"{"jsonrpc":"2.0","id":1}"#;
        assert!(Protocol::parse_response(body).is_err());
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(
            Protocol::generate_request_id(),
            Protocol::generate_request_id()
        );
    }
}
