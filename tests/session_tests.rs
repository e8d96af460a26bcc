//! End-to-end session tests against a scripted streamable-HTTP server.
//!
//! The mock server answers `initialize`, `tools/list` and `tools/call` with
//! canned results, echoing each request's JSON-RPC id, and accepts the
//! `notifications/initialized` notification with `202` and no body.

use docquery_client::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const SESSION_ID_HEADER: &str = "mcp-session-id";

/// One scripted MCP server endpoint.
struct ScriptedServer {
    /// Session id issued on every response, when set.
    session_id: Option<&'static str>,
    /// Result payload for `tools/list`.
    tools_result: Value,
    /// Result or error payload for `tools/call`.
    call_reply: CallReply,
    /// Deliver reply bodies as SSE streams instead of plain JSON.
    sse: bool,
}

enum CallReply {
    Result(Value),
    Error { code: i64, message: &'static str },
}

impl Default for ScriptedServer {
    fn default() -> Self {
        Self {
            session_id: None,
            tools_result: json!({
                "tools": [
                    {
                        "name": "microsoft_docs_search",
                        "title": "Search Microsoft documentation",
                        "inputSchema": {"type": "object"},
                    },
                    {
                        "name": "microsoft_docs_fetch",
                        "inputSchema": {"type": "object"},
                    },
                ]
            }),
            call_reply: CallReply::Result(json!({
                "content": [
                    {"type": "text", "text": "Yes, Azure AI Foundry has a Python SDK."}
                ]
            })),
            sse: false,
        }
    }
}

impl Respond for ScriptedServer {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let message: Value = match serde_json::from_slice(&request.body) {
            Ok(v) => v,
            Err(_) => return ResponseTemplate::new(400),
        };

        // Notifications carry no id and get no reply body.
        let Some(id) = message.get("id").cloned() else {
            return ResponseTemplate::new(202);
        };

        // Once a session id has been issued the client must echo it.
        if let Some(expected) = self.session_id {
            let echoed = request
                .headers
                .get(SESSION_ID_HEADER)
                .and_then(|v| v.to_str().ok());
            if message["method"] != "initialize" && echoed != Some(expected) {
                return ResponseTemplate::new(404);
            }
        }

        let reply = match message["method"].as_str() {
            Some("initialize") => json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {"tools": {"listChanged": false}},
                    "serverInfo": {"name": "scripted-learn", "version": "0.0.1"},
                }
            }),
            Some("tools/list") => json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": self.tools_result,
            }),
            Some("tools/call") => match &self.call_reply {
                CallReply::Result(result) => json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": result,
                }),
                CallReply::Error { code, message } => json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": {"code": code, "message": message},
                }),
            },
            _ => return ResponseTemplate::new(404),
        };

        let mut template = if self.sse {
            ResponseTemplate::new(200).set_body_raw(
                format!("event: message\ndata: {reply}\n\n"),
                "text/event-stream",
            )
        } else {
            ResponseTemplate::new(200).set_body_json(&reply)
        };
        if let Some(session_id) = self.session_id {
            template = template.insert_header(SESSION_ID_HEADER, session_id);
        }
        template
    }
}

async fn mount_scripted(responder: ScriptedServer) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(responder)
        .mount(&server)
        .await;
    server
}

fn session_for(server: &MockServer) -> SessionClient {
    let transport = StreamableHttpTransport::connect(&server.uri()).unwrap();
    SessionClient::new(
        Box::new(transport),
        Implementation {
            name: "docquery-tests".to_string(),
            version: "0.0.0".to_string(),
        },
        ClientCapabilities::default(),
    )
}

#[tokio::test]
async fn full_session_over_json_bodies() {
    let server = mount_scripted(ScriptedServer::default()).await;
    let mut session = session_for(&server);

    let init = session.initialize().await.unwrap();
    assert_eq!(init.server_info.name, "scripted-learn");
    assert_eq!(session.phase(), SessionPhase::Initialized);

    let listing = session.list_tools().await.unwrap();
    assert_eq!(listing.tools.len(), 2);
    assert_eq!(
        listing.tools[0].display_label(),
        "Search Microsoft documentation"
    );
    assert_eq!(listing.tools[1].display_label(), "microsoft_docs_fetch");

    let result = session
        .call_tool("microsoft_docs_search", Some(json!({"query": "sdk?"})))
        .await
        .unwrap();
    assert!(!result.flagged_as_error());
    assert_eq!(
        result.content[0].as_text().unwrap(),
        "Yes, Azure AI Foundry has a Python SDK."
    );

    session.close().await.unwrap();
    assert_eq!(session.phase(), SessionPhase::Closed);
}

#[tokio::test]
async fn replies_delivered_over_sse_are_decoded() {
    let server = mount_scripted(ScriptedServer {
        sse: true,
        ..Default::default()
    })
    .await;
    let mut session = session_for(&server);

    session.initialize().await.unwrap();
    let listing = session.list_tools().await.unwrap();
    assert_eq!(listing.tools.len(), 2);

    let result = session
        .call_tool("microsoft_docs_search", Some(json!({"query": "sdk?"})))
        .await
        .unwrap();
    assert!(result.content[0].as_text().is_some());
}

#[tokio::test]
async fn server_session_id_is_echoed_and_released() {
    let server = mount_scripted(ScriptedServer {
        session_id: Some("sess-1234"),
        ..Default::default()
    })
    .await;
    Mock::given(method("DELETE"))
        .and(path("/"))
        .and(header(SESSION_ID_HEADER, "sess-1234"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.initialize().await.unwrap();

    // The scripted responder 404s any post-handshake request that does not
    // echo the issued id, so these succeeding proves the echo.
    session.list_tools().await.unwrap();
    session
        .call_tool("microsoft_docs_search", Some(json!({"query": "sdk?"})))
        .await
        .unwrap();

    session.close().await.unwrap();
}

#[tokio::test]
async fn streamable_only_server_rejection_carries_hint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let err = session.initialize().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Connection(ConnectionError::StreamingRejected)
    ));
    assert!(err.remediation_hint().unwrap().contains("streamable-HTTP"));

    session.close().await.unwrap();
}

#[tokio::test]
async fn http_rejection_status_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let err = session.initialize().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Connection(ConnectionError::Rejected { status: 503 })
    ));
}

#[tokio::test]
async fn remote_tool_error_surfaces_as_invocation_failure() {
    let server = mount_scripted(ScriptedServer {
        call_reply: CallReply::Error {
            code: -32602,
            message: "unknown tool",
        },
        ..Default::default()
    })
    .await;

    let mut session = session_for(&server);
    session.initialize().await.unwrap();

    let err = session
        .call_tool("no_such_tool", Some(json!({"query": "sdk?"})))
        .await
        .unwrap_err();
    match err {
        Error::ToolInvocation(ToolInvocationError::Remote { ref tool, code, .. }) => {
            assert_eq!(tool, "no_such_tool");
            assert_eq!(code, -32602);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.is_fatal());

    // The session survives a failed invocation and can still close cleanly.
    session.close().await.unwrap();
}

#[tokio::test]
async fn soft_error_flag_comes_back_as_a_result() {
    let server = mount_scripted(ScriptedServer {
        call_reply: CallReply::Result(json!({
            "content": [{"type": "text", "text": "query must not be empty"}],
            "isError": true,
        })),
        ..Default::default()
    })
    .await;

    let mut session = session_for(&server);
    session.initialize().await.unwrap();

    let result = session
        .call_tool("microsoft_docs_search", Some(json!({"query": ""})))
        .await
        .unwrap();
    assert!(result.flagged_as_error());
    assert_eq!(result.content[0].as_text().unwrap(), "query must not be empty");
}

#[tokio::test]
async fn structured_content_is_preserved() {
    let server = mount_scripted(ScriptedServer {
        call_reply: CallReply::Result(json!({
            "content": [{"type": "text", "text": "see structured payload"}],
            "structuredContent": {"answer": true, "sdk": "azure-ai-projects"},
        })),
        ..Default::default()
    })
    .await;

    let mut session = session_for(&server);
    session.initialize().await.unwrap();

    let result = session
        .call_tool("microsoft_docs_search", Some(json!({"query": "sdk?"})))
        .await
        .unwrap();
    let structured = result.structured_content.unwrap();
    assert_eq!(structured["sdk"], "azure-ai-projects");
}
