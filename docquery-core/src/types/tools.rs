//! Tool-related types and messages.
//!
//! A tool is a remote capability the server advertises through `tools/list`
//! and executes through `tools/call`. This module defines the descriptor
//! returned by the listing and the request/response bodies for both calls.
//!
//! # Example
//!
//! ```rust
//! use docquery_core::types::Tool;
//!
//! let tool = Tool::new("microsoft_docs_search");
//! assert_eq!(tool.display_label(), "microsoft_docs_search");
//! ```

use super::*;
use smallvec::SmallVec;

/// A remote-advertised tool descriptor.
///
/// Only `name` is guaranteed; servers vary in whether they supply a `title`,
/// a `description`, an input schema, or an annotation mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// The unique name of the tool.
    pub name: String,
    /// Optional human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional human-readable description of what the tool does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool's input parameters.
    #[serde(rename = "inputSchema")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
    /// Optional annotation mapping; some servers put a display title here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<serde_json::Map<String, Value>>,
}

impl Tool {
    /// Creates a descriptor with only a name, the one field servers must send.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            input_schema: None,
            annotations: None,
        }
    }

    /// Resolve the label to display for this tool.
    ///
    /// Precedence: explicit `title`, then a string `title` key in the
    /// annotation mapping, then the tool name. Display-only policy with no
    /// semantic effect; invocation always goes by `name`.
    pub fn display_label(&self) -> &str {
        self.title
            .as_deref()
            .or_else(|| {
                self.annotations
                    .as_ref()
                    .and_then(|a| a.get("title"))
                    .and_then(Value::as_str)
            })
            .unwrap_or(&self.name)
    }
}

/// Request body for `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolsListRequest {
    /// Pagination parameters; this client never paginates and leaves the
    /// cursor empty.
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl ToolsListRequest {
    /// Creates a request for the first (and, for this client, only) page.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Response body for `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsListResponse {
    /// Ordered list of advertised tools.
    pub tools: Vec<Tool>,
    /// Cursor for pagination, present when the server has more tools.
    #[serde(rename = "nextCursor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Response metadata.
    #[serde(flatten)]
    pub meta: ResponseMetadata,
}

/// Request body for `tools/call`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCallRequest {
    /// The name of the tool to call.
    pub name: String,
    /// Arguments for the tool, structured per its input schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

/// Response body for `tools/call`.
///
/// `content` uses `SmallVec` since most tool responses carry one or two
/// blocks. `is_error` is the soft error flag: the call succeeded at the
/// transport level but the server marks its own payload as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCallResponse {
    /// Ordered content blocks produced by the tool.
    #[serde(default)]
    pub content: SmallVec<[Content; 2]>,
    /// Optional structured payload mirroring the content.
    #[serde(rename = "structuredContent")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    /// Whether the tool flagged its own result as an error.
    #[serde(rename = "isError")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
    /// Response metadata.
    #[serde(flatten)]
    pub meta: ResponseMetadata,
}

impl ToolsCallResponse {
    /// Whether the server flagged this result as an error.
    pub fn flagged_as_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}
