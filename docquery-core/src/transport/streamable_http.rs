//! Streamable-HTTP transport for MCP.
//!
//! Every JSON-RPC message is an HTTP POST to the endpoint with
//! `Accept: application/json, text/event-stream`. Servers reply either with
//! a plain JSON body, with a short SSE stream whose first JSON-RPC response
//! event is the reply, or with `202 Accepted` and no body (notifications).
//! The server may issue an `Mcp-Session-Id` on the initialize response; the
//! transport echoes it on every subsequent request and sends a best-effort
//! HTTP DELETE carrying it when the session closes.
//!
//! Servers that only accept streamable-HTTP clients answer bare or
//! ill-formed requests with `405 Method Not Allowed`; that status is
//! surfaced as [`ConnectionError::StreamingRejected`] so callers can print
//! a useful remediation hint.

use super::*;
use crate::error::ConnectionError;
use crate::protocol::PROTOCOL_VERSION;
use futures::StreamExt;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, trace};
use url::Url;

/// Header carrying the server-issued session id.
pub const SESSION_ID_HEADER: &str = "mcp-session-id";
/// Header carrying the negotiated protocol version.
pub const PROTOCOL_VERSION_HEADER: &str = "MCP-Protocol-Version";

/// Streamable-HTTP transport.
///
/// Exclusively owned by one session for its whole lifetime; no interior
/// locking. Construction does not touch the network - streamable-HTTP
/// servers commonly reject bare GET probes, so the first real contact is
/// the initialize POST and connection failures are classified there.
pub struct StreamableHttpTransport {
    client: Client,
    endpoint: Url,
    session_id: Option<String>,
    connected: bool,
    stats: TransportStats,
}

impl StreamableHttpTransport {
    /// Create a transport for the given endpoint URL.
    ///
    /// Fails only on an unparseable URL; network errors surface from
    /// [`Transport::exchange`] on first use.
    pub fn connect(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            session_id: None,
            connected: true,
            stats: TransportStats {
                connection_time: Some(chrono::Utc::now()),
                ..Default::default()
            },
        })
    }

    /// The endpoint URL this transport posts to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// The server-issued session id, once one has been captured.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Current transport statistics.
    pub fn stats(&self) -> &TransportStats {
        &self.stats
    }

    /// Drain an SSE reply body until a JSON-RPC response event arrives.
    ///
    /// Servers may interleave unrelated events (progress notifications,
    /// keep-alive comments) before the response; those are skipped. A stream
    /// that ends without a response yields `None`.
    async fn read_sse_reply(&mut self, response: reqwest::Response) -> Result<Option<String>> {
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ConnectionError::BodyRead(e.to_string()))?;
            buffer.push_str(&String::from_utf8_lossy(&chunk).replace("\r\n", "\n"));

            while let Some(pos) = buffer.find("\n\n") {
                let event = buffer[..pos].to_string();
                buffer.drain(..pos + 2);
                match parse_sse_event(&event) {
                    Some(data) if looks_like_reply(&data) => return Ok(Some(data)),
                    Some(_) => trace!("skipping non-response SSE event"),
                    None => {}
                }
            }
        }

        debug!("SSE stream ended without a response event");
        Ok(None)
    }
}

#[async_trait]
impl Transport for StreamableHttpTransport {
    async fn exchange(&mut self, message: &str) -> Result<Option<String>> {
        if !self.connected {
            return Err(ConnectionError::Establish("transport is closed".to_string()).into());
        }

        trace!(endpoint = %self.endpoint, "posting message: {}", message);

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json, text/event-stream")
            .header(PROTOCOL_VERSION_HEADER, PROTOCOL_VERSION);
        if let Some(session_id) = &self.session_id {
            request = request.header(SESSION_ID_HEADER, session_id);
        }

        let response = request
            .body(message.to_string())
            .send()
            .await
            .map_err(|e| ConnectionError::Establish(e.to_string()))?;

        self.stats.messages_sent += 1;
        self.stats.bytes_sent += message.len() as u64;
        self.stats.last_activity = Some(chrono::Utc::now());

        let status = response.status();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            return Err(ConnectionError::StreamingRejected.into());
        }
        if !status.is_success() {
            return Err(ConnectionError::Rejected {
                status: status.as_u16(),
            }
            .into());
        }

        if let Some(session_id) = response
            .headers()
            .get(SESSION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            if self.session_id.as_deref() != Some(session_id) {
                debug!(session_id, "server issued session id");
                self.session_id = Some(session_id.to_string());
            }
        }

        if status == StatusCode::ACCEPTED {
            debug!("message accepted with no reply body");
            return Ok(None);
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = if content_type.starts_with("text/event-stream") {
            self.read_sse_reply(response).await?
        } else {
            let text = response
                .text()
                .await
                .map_err(|e| ConnectionError::BodyRead(e.to_string()))?;
            if text.is_empty() { None } else { Some(text) }
        };

        if let Some(body) = &body {
            self.stats.messages_received += 1;
            self.stats.bytes_received += body.len() as u64;
        }

        Ok(body)
    }

    async fn close(&mut self) -> Result<()> {
        if !self.connected {
            return Ok(());
        }

        // Best-effort session termination; servers without session state
        // will answer 405 and that is fine.
        if let Some(session_id) = self.session_id.take() {
            let result = self
                .client
                .delete(self.endpoint.clone())
                .header(SESSION_ID_HEADER, &session_id)
                .header(PROTOCOL_VERSION_HEADER, PROTOCOL_VERSION)
                .send()
                .await;
            if let Err(e) = result {
                debug!(error = %e, "session DELETE failed");
            }
        }

        self.connected = false;
        debug!("streamable HTTP transport closed");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn transport_type(&self) -> &'static str {
        "streamable-http"
    }
}

/// Extract the data payload from one SSE event block.
///
/// Joins multi-line `data:` fields with newlines, ignores comment lines and
/// the `event:`/`id:`/`retry:` fields. Returns `None` for events with no
/// data at all (keep-alive comments).
fn parse_sse_event(event: &str) -> Option<String> {
    let mut data_lines = Vec::new();

    for line in event.lines() {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        let (field, value) = match line.find(':') {
            Some(pos) => (&line[..pos], line[pos + 1..].strip_prefix(' ').unwrap_or(&line[pos + 1..])),
            None => (line, ""),
        };
        if field == "data" {
            data_lines.push(value);
        }
    }

    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}

/// Whether an SSE data payload is a JSON-RPC response (as opposed to a
/// server-initiated request or notification riding the same stream).
fn looks_like_reply(data: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(data)
        .map(|v| v.get("result").is_some() || v.get("error").is_some())
        .unwrap_or(false)
}
