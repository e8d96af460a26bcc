//! Handshake messages
//!
//! The initialize exchange that opens every MCP session: the client sends
//! `initialize`, validates the response, and then posts the
//! `notifications/initialized` notification before any other call.

use super::*;

/// Initialize request - first message sent by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeRequest {
    /// The MCP protocol version supported by the client
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// The capabilities supported by the client
    pub capabilities: ClientCapabilities,
    /// Information about the client implementation
    #[serde(rename = "clientInfo")]
    pub client_info: Implementation,
}

/// Initialize response from the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    /// The MCP protocol version in use for this session
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// The capabilities supported by the server
    pub capabilities: ServerCapabilities,
    /// Information about the server implementation
    #[serde(rename = "serverInfo")]
    pub server_info: Implementation,
    /// Optional usage instructions from the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}
