//! Transport abstraction for MCP communication
//!
//! A strictly sequential client pairs every outbound message with at most
//! one reply body, so the seam here is a single `exchange` call rather than
//! a free-running send/receive pair. The streamable-HTTP implementation
//! lives in [`streamable_http`]; tests substitute scripted transports
//! through the same trait.

use crate::Result;
use async_trait::async_trait;

pub mod streamable_http;

/// Transport abstraction for MCP communication.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one serialized JSON-RPC message and return the reply body, if
    /// the server produced one. Notifications legitimately get no reply.
    async fn exchange(&mut self, message: &str) -> Result<Option<String>>;

    /// Release the transport. Safe to call on an already-closed transport.
    async fn close(&mut self) -> Result<()>;

    /// Whether the transport is still usable.
    fn is_connected(&self) -> bool;

    /// Get the transport type name.
    fn transport_type(&self) -> &'static str;
}

/// Transport statistics
#[derive(Debug, Clone, Default)]
pub struct TransportStats {
    /// Number of messages sent
    pub messages_sent: u64,
    /// Number of reply bodies received
    pub messages_received: u64,
    /// Number of bytes sent
    pub bytes_sent: u64,
    /// Number of bytes received
    pub bytes_received: u64,
    /// Connection establishment time
    pub connection_time: Option<chrono::DateTime<chrono::Utc>>,
    /// Last activity timestamp
    pub last_activity: Option<chrono::DateTime<chrono::Utc>>,
}
