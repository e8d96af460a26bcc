//! docquery - query the Microsoft Learn MCP server once and print the answer.
//!
//! Connects to the Learn MCP endpoint over streamable HTTP, performs the
//! initialize handshake, lists the advertised tools, invokes the
//! documentation search tool with one fixed question, prints the result,
//! and closes the session. One linear pass; no retries, no reconnects.

use docquery_client::prelude::*;
use serde_json::json;
use std::process::ExitCode;

/// Remote MCP endpoint (the Microsoft Learn MCP server).
const DEFAULT_ENDPOINT: &str = "https://learn.microsoft.com/api/mcp";
/// Environment variable overriding the endpoint.
const ENDPOINT_ENV: &str = "DOCQUERY_ENDPOINT";
/// The documentation search tool on the Learn server.
const SEARCH_TOOL: &str = "microsoft_docs_search";
/// The one question this demo asks.
const QUESTION: &str = "Does Azure AI Foundry offer a Python SDK?";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let endpoint =
        std::env::var(ENDPOINT_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

    match run(&endpoint).await {
        Ok(status) => status,
        Err(e) => {
            println!("Failed to connect or complete the request: {e}");
            if let Some(hint) = e.remediation_hint() {
                println!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Run the full session sequence against one endpoint.
///
/// Fatal connection/session failures propagate to the caller; a remote
/// tool-invocation failure is printed at the invocation step and becomes a
/// failure exit status. Either way the session is closed exactly once
/// before this function returns.
async fn run(endpoint: &str) -> Result<ExitCode> {
    println!("Connecting to MCP server: {endpoint}");
    let transport = StreamableHttpTransport::connect(endpoint)?;

    let mut session = SessionClient::new(
        Box::new(transport),
        Implementation {
            name: "docquery".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        ClientCapabilities::default(),
    );

    let outcome = drive(&mut session).await;
    let close_result = session.close().await;

    let status = outcome?;
    close_result?;
    Ok(status)
}

/// The linear step sequence after connect: initialize, list, invoke, print.
async fn drive(session: &mut SessionClient) -> Result<ExitCode> {
    println!("Initializing session...");
    let init = session.initialize().await?;
    println!("Session initialized.");
    if let Some(instructions) = &init.instructions {
        tracing::debug!(%instructions, "server instructions");
    }

    let listing = session.list_tools().await?;
    println!();
    println!("Available tools:");
    for line in render::tool_listing(&listing.tools) {
        println!("{line}");
    }

    println!();
    println!("Invoking tool '{SEARCH_TOOL}' with query: {QUESTION}");
    println!();

    let result = match session
        .call_tool(SEARCH_TOOL, Some(json!({"query": QUESTION})))
        .await
    {
        Ok(result) => result,
        Err(Error::ToolInvocation(e)) => {
            println!("Tool invocation failed: {e}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e),
    };

    println!("=== Tool call content blocks ===");
    for line in render::call_result(&result) {
        println!("{line}");
    }

    println!("Done.");
    Ok(ExitCode::SUCCESS)
}
