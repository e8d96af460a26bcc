//! Error types for docquery.
//!
//! The taxonomy mirrors where a failure originates in the session lifecycle:
//! [`ConnectionError`] for the transport, [`SessionError`] for the handshake
//! and request sequencing, and [`ToolInvocationError`] for remote failures
//! raised while executing a tool call. All three are fatal to the step that
//! produced them; none are retried.
//!
//! # Examples
//!
//! ```rust
//! use docquery_core::error::{Error, SessionError};
//!
//! fn guard(initialized: bool) -> docquery_core::Result<()> {
//!     if !initialized {
//!         return Err(Error::Session(SessionError::NotInitialized {
//!             operation: "tools/list",
//!         }));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias for docquery operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for docquery operations.
///
/// Each variant identifies the layer a failure belongs to, which is what the
/// demo binary keys its reporting and exit status on: connection and session
/// failures terminate the run at the outermost scope, while tool-invocation
/// failures are handled at the invocation step.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport could not be established or the endpoint rejected it.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Handshake failure or a request attempted out of sequence.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// The remote raised an error while executing a tool call.
    #[error("tool invocation error: {0}")]
    ToolInvocation(#[from] ToolInvocationError),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Endpoint URL parsing failed.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Transport-level errors.
///
/// These cover everything that can go wrong before a JSON-RPC reply is in
/// hand: the HTTP connection itself, and status-level rejections of the
/// streamable session.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The HTTP connection to the endpoint could not be established.
    #[error("failed to establish connection: {0}")]
    Establish(String),

    /// The endpoint answered with 405, the signature of a server that only
    /// speaks to streamable-HTTP capable clients.
    #[error("endpoint rejected the streaming session (HTTP 405 Method Not Allowed)")]
    StreamingRejected,

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {status}")]
    Rejected {
        /// HTTP status code returned by the endpoint.
        status: u16,
    },

    /// The response body could not be read from the wire.
    #[error("failed to read response body: {0}")]
    BodyRead(String),
}

/// Session-level errors.
///
/// Raised when the MCP handshake fails, when a call is attempted in the
/// wrong session phase, or when the server rejects a non-invocation request.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server rejected the initialize request.
    #[error("initialize rejected by server (code {code}): {message}")]
    HandshakeRejected {
        /// JSON-RPC error code from the server.
        code: i32,
        /// Error message from the server.
        message: String,
    },

    /// A response body could not be understood.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// `initialize` was called on an already-initialized session.
    #[error("session is already initialized")]
    AlreadyInitialized,

    /// A response arrived without the expected `result` member.
    #[error("response to {0} missing result")]
    MissingResult(&'static str),

    /// A request arrived with no reply body at all.
    #[error("no response received for {0}")]
    MissingResponse(&'static str),

    /// An operation was attempted before the handshake completed.
    #[error("{operation} attempted before session initialization")]
    NotInitialized {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// An operation was attempted after the session was closed.
    #[error("{operation} attempted on a closed session")]
    Closed {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// The server rejected a request other than a tool invocation.
    #[error("server rejected {operation} (code {code}): {message}")]
    RequestRejected {
        /// The request method that was rejected.
        operation: &'static str,
        /// JSON-RPC error code from the server.
        code: i32,
        /// Error message from the server.
        message: String,
    },
}

/// Errors raised by the remote while executing a tool call.
#[derive(Debug, Error)]
pub enum ToolInvocationError {
    /// The server returned a JSON-RPC error for the call.
    #[error("remote error {code} calling '{tool}': {message}")]
    Remote {
        /// Name of the tool that was invoked.
        tool: String,
        /// JSON-RPC error code from the server.
        code: i32,
        /// Error message from the server.
        message: String,
        /// Additional error detail, if the server supplied any.
        data: Option<serde_json::Value>,
    },

    /// The call succeeded at the wire level but the result could not be
    /// decoded into a tool result.
    #[error("malformed tool result for '{tool}': {detail}")]
    MalformedResult {
        /// Name of the tool that was invoked.
        tool: String,
        /// Decoding failure detail.
        detail: String,
    },
}

impl Error {
    /// A user-facing remediation hint for this failure, if one applies.
    ///
    /// Connection-class rejections get the streaming-client hint; other
    /// errors carry enough context in their `Display` form.
    pub fn remediation_hint(&self) -> Option<&'static str> {
        match self {
            Self::Connection(ConnectionError::StreamingRejected)
            | Self::Connection(ConnectionError::Rejected { .. }) => Some(
                "Note: this endpoint requires a streamable-HTTP capable MCP client. \
                 Ensure the endpoint URL is correct and your environment supports HTTPS streaming.",
            ),
            _ => None,
        }
    }

    /// Whether this failure is fatal to the whole run.
    ///
    /// Tool-invocation failures are handled at the invocation step; the
    /// session is still closed and the remaining steps are skipped, but the
    /// outer error path is not taken.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ToolInvocation(_))
    }
}
