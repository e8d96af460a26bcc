//! Core MCP types
//!
//! Message types and data structures for the subset of the Model Context
//! Protocol this client exercises: the initialize handshake, tool listing,
//! and tool invocation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod capabilities;
pub mod messages;
pub mod tools;

pub use capabilities::*;
pub use messages::*;
pub use tools::*;

/// Text content block.
///
/// The most common block kind in tool results: a UTF-8 string, optionally
/// carrying an annotation object the server attaches for display hints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    /// The text payload.
    pub text: String,
    /// Optional annotations attached by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Value>,
}

impl TextContent {
    /// Creates a new text content block.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: None,
        }
    }
}

/// A content block in a tool result.
///
/// Blocks are tagged by a `type` field on the wire. Text blocks are decoded
/// fully; every other kind (image, audio, resource links, kinds added by
/// future protocol revisions) is preserved as its raw JSON value rather than
/// rejected, so unknown blocks survive to be displayed opaquely.
#[derive(Debug, Clone)]
pub enum Content {
    /// A `type: "text"` block.
    Text(TextContent),
    /// Any other block kind, kept as received.
    Other(Value),
}

impl Content {
    /// The text payload if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(&text.text),
            Content::Other(_) => None,
        }
    }
}

impl Serialize for Content {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct TaggedText<'a> {
            #[serde(rename = "type")]
            kind: &'static str,
            text: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            annotations: Option<&'a Value>,
        }

        match self {
            Content::Text(text) => TaggedText {
                kind: "text",
                text: &text.text,
                annotations: text.annotations.as_ref(),
            }
            .serialize(serializer),
            Content::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value.get("type").and_then(Value::as_str) {
            Some("text") => {
                let text =
                    serde_json::from_value(value).map_err(serde::de::Error::custom)?;
                Ok(Content::Text(text))
            }
            _ => Ok(Content::Other(value)),
        }
    }
}

impl From<TextContent> for Content {
    fn from(text: TextContent) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(TextContent::new(text))
    }
}

/// Implementation info exchanged during the handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Implementation {
    /// Name of the implementation
    pub name: String,
    /// Version of the implementation
    pub version: String,
}

/// Common pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaginationParams {
    /// Cursor value for pagination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Meta information included in responses
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResponseMetadata {
    /// Additional metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _meta: Option<Value>,
}
