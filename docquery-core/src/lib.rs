//! # docquery core
//!
//! Core types and protocol plumbing for the docquery MCP client: the
//! JSON-RPC 2.0 message layer, the MCP types the client exercises
//! (handshake, tool listing, tool invocation), the error taxonomy, and the
//! streamable-HTTP transport.
//!
//! The session logic built on top of these pieces lives in the
//! `docquery-client` crate; this crate knows nothing about call ordering.

#![warn(missing_docs)]

pub mod error;
pub mod protocol;
pub mod transport;
pub mod types;

pub use error::{Error, Result};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, Protocol, PROTOCOL_VERSION};
pub use transport::{Transport, TransportStats};
pub use types::*;

/// Prelude for docquery development
pub mod prelude {
    pub use crate::error::{
        ConnectionError, Error, Result, SessionError, ToolInvocationError,
    };
    pub use crate::protocol::{
        JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, Protocol,
        RequestId, PROTOCOL_VERSION,
    };
    pub use crate::transport::streamable_http::StreamableHttpTransport;
    pub use crate::transport::{Transport, TransportStats};
    pub use crate::types::*;
}
