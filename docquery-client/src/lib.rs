//! # docquery client
//!
//! A high-level MCP session client for the docquery demo: one transport,
//! one handshake-to-close lifetime, strictly sequential requests.
//!
//! The session phase only moves forward (`Connected` → `Initialized` →
//! `Closed`); listing and invocation are refused before initialization, and
//! the transport is released exactly once no matter which step failed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docquery_client::SessionClient;
//! use docquery_core::prelude::*;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let transport = StreamableHttpTransport::connect("https://learn.microsoft.com/api/mcp")?;
//!     let mut session = SessionClient::new(
//!         Box::new(transport),
//!         Implementation {
//!             name: "docquery".to_string(),
//!             version: "0.1.0".to_string(),
//!         },
//!         ClientCapabilities::default(),
//!     );
//!
//!     session.initialize().await?;
//!     let tools = session.list_tools().await?;
//!     for tool in &tools.tools {
//!         println!(" - {}", tool.display_label());
//!     }
//!
//!     let result = session
//!         .call_tool("microsoft_docs_search", Some(json!({"query": "what is MCP?"})))
//!         .await?;
//!     println!("{} content block(s)", result.content.len());
//!
//!     session.close().await
//! }
//! ```

use docquery_core::prelude::*;
use serde_json::Value;
use tracing::{debug, trace};

pub mod render;

/// Phase of a session's forward-only lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Transport constructed; handshake not yet performed.
    Connected,
    /// Handshake complete; listing and invocation are allowed.
    Initialized,
    /// Transport released. Terminal, reachable from any phase.
    Closed,
}

/// High-level MCP session client.
///
/// Owns its transport exclusively for the whole session; all methods take
/// `&mut self` and no locking is involved. The caller is responsible for
/// ending every session with [`SessionClient::close`], on success and on
/// failure alike; `close` is idempotent so running it in a common epilogue
/// path is safe.
pub struct SessionClient {
    transport: Box<dyn Transport>,
    phase: SessionPhase,
    info: Implementation,
    capabilities: ClientCapabilities,
    server_info: Option<Implementation>,
}

impl SessionClient {
    /// Create a session over an already-constructed transport.
    pub fn new(
        transport: Box<dyn Transport>,
        info: Implementation,
        capabilities: ClientCapabilities,
    ) -> Self {
        Self {
            transport,
            phase: SessionPhase::Connected,
            info,
            capabilities,
            server_info: None,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Server implementation info captured during the handshake.
    pub fn server_info(&self) -> Option<&Implementation> {
        self.server_info.as_ref()
    }

    /// Perform the MCP initialize handshake.
    ///
    /// Sends `initialize`, validates the response, and posts the
    /// `notifications/initialized` notification; only then are other calls
    /// allowed. Fails with a [`SessionError`] on a rejected or malformed
    /// handshake.
    pub async fn initialize(&mut self) -> Result<InitializeResponse> {
        match self.phase {
            SessionPhase::Connected => {}
            SessionPhase::Initialized => {
                return Err(SessionError::AlreadyInitialized.into());
            }
            SessionPhase::Closed => {
                return Err(SessionError::Closed {
                    operation: "initialize",
                }
                .into());
            }
        }

        let params = serde_json::to_value(InitializeRequest {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: self.capabilities.clone(),
            client_info: self.info.clone(),
        })?;

        let response = self.request("initialize", Some(params)).await?;
        if let Some(error) = response.error {
            return Err(SessionError::HandshakeRejected {
                code: error.code,
                message: error.message,
            }
            .into());
        }

        let result = response
            .result
            .ok_or(SessionError::MissingResult("initialize"))?;
        let init: InitializeResponse = serde_json::from_value(result)
            .map_err(|e| SessionError::MalformedResponse(format!("initialize result: {e}")))?;

        // The handshake is not complete until the server has been told.
        let notification = Protocol::notification("notifications/initialized", None);
        let message = serde_json::to_string(&notification)?;
        self.transport.exchange(&message).await?;

        self.server_info = Some(init.server_info.clone());
        self.phase = SessionPhase::Initialized;
        debug!(server = %init.server_info.name, "session initialized");

        Ok(init)
    }

    /// Request the full set of invocable tools.
    ///
    /// Zero advertised tools is a valid (empty) listing, not an error.
    pub async fn list_tools(&mut self) -> Result<ToolsListResponse> {
        self.ensure_initialized("tools/list")?;

        let params = serde_json::to_value(ToolsListRequest::new())?;
        let response = self.request("tools/list", Some(params)).await?;
        if let Some(error) = response.error {
            return Err(SessionError::RequestRejected {
                operation: "tools/list",
                code: error.code,
                message: error.message,
            }
            .into());
        }

        let result = response
            .result
            .ok_or(SessionError::MissingResult("tools/list"))?;
        serde_json::from_value(result)
            .map_err(|e| SessionError::MalformedResponse(format!("tools/list result: {e}")).into())
    }

    /// Invoke one tool by name.
    ///
    /// A JSON-RPC error from the remote maps to
    /// [`ToolInvocationError::Remote`]; a response the server marks with
    /// `isError` is not an error here - it comes back as a normal result
    /// carrying the flag.
    pub async fn call_tool(
        &mut self,
        name: impl Into<String>,
        arguments: Option<Value>,
    ) -> Result<ToolsCallResponse> {
        self.ensure_initialized("tools/call")?;

        let name = name.into();
        let params = serde_json::to_value(ToolsCallRequest {
            name: name.clone(),
            arguments,
        })?;

        let response = self.request("tools/call", Some(params)).await?;
        if let Some(error) = response.error {
            return Err(ToolInvocationError::Remote {
                tool: name,
                code: error.code,
                message: error.message,
                data: error.data,
            }
            .into());
        }

        let result = response.result.ok_or_else(|| ToolInvocationError::MalformedResult {
            tool: name.clone(),
            detail: "missing result".to_string(),
        })?;
        serde_json::from_value(result).map_err(|e| {
            ToolInvocationError::MalformedResult {
                tool: name,
                detail: e.to_string(),
            }
            .into()
        })
    }

    /// Release the transport.
    ///
    /// Idempotent: the first call closes the transport, later calls are
    /// no-ops. The phase moves to `Closed` even if the transport's own
    /// close fails, so the release can never run twice.
    pub async fn close(&mut self) -> Result<()> {
        if self.phase == SessionPhase::Closed {
            return Ok(());
        }
        self.phase = SessionPhase::Closed;
        self.transport.close().await
    }

    fn ensure_initialized(&self, operation: &'static str) -> Result<()> {
        match self.phase {
            SessionPhase::Initialized => Ok(()),
            SessionPhase::Connected => Err(SessionError::NotInitialized { operation }.into()),
            SessionPhase::Closed => Err(SessionError::Closed { operation }.into()),
        }
    }

    /// Send one request and decode its reply.
    async fn request(
        &mut self,
        method: &'static str,
        params: Option<Value>,
    ) -> Result<JsonRpcResponse> {
        let request = Protocol::request(method, params);
        let message = serde_json::to_string(&request)?;

        trace!(method, "sending request");
        let body = self
            .transport
            .exchange(&message)
            .await?
            .ok_or(SessionError::MissingResponse(method))?;

        let response = Protocol::parse_response(&body)?;
        if response.id.as_ref() != Some(&request.id) {
            return Err(SessionError::MalformedResponse(format!(
                "response id does not match request id for {method}"
            ))
            .into());
        }
        Ok(response)
    }
}

/// Prelude for docquery client development
pub mod prelude {
    pub use crate::render;
    pub use crate::{SessionClient, SessionPhase};
    pub use docquery_core::prelude::*;
}
