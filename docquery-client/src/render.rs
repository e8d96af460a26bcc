//! Rendering of session results into printable lines.
//!
//! Kept pure (slices in, `Vec<String>` out) so the printed report can be
//! asserted on directly in tests; the binary just joins and prints.

use docquery_core::prelude::*;
use serde_json::Value;

/// Render the tool listing, one line per advertised tool.
///
/// Each line shows the tool name and its resolved display label; an empty
/// listing renders as zero lines.
pub fn tool_listing(tools: &[Tool]) -> Vec<String> {
    tools
        .iter()
        .map(|tool| format!(" - {} (title={})", tool.name, tool.display_label()))
        .collect()
}

/// Render a tool result: the soft-error notice, the 1-indexed content
/// blocks, and the structured payload section.
///
/// The error-flag notice is additive - blocks are still printed in full.
/// Unknown block kinds are shown opaquely rather than skipped or rejected.
pub fn call_result(result: &ToolsCallResponse) -> Vec<String> {
    let mut lines = Vec::new();

    if result.flagged_as_error() {
        lines.push("Tool returned an error flag.".to_string());
    }

    if result.content.is_empty() {
        lines.push("No content blocks returned by the tool.".to_string());
    } else {
        for (idx, block) in result.content.iter().enumerate() {
            let idx = idx + 1;
            match block {
                Content::Text(text) => {
                    lines.push(format!("[Text #{idx}]"));
                    lines.push(text.text.clone());
                    lines.push(String::new());
                }
                Content::Other(raw) => lines.push(format!("[Content #{idx}]: {raw}")),
            }
        }
    }

    if let Some(value) = &result.structured_content {
        if !is_empty_value(value) {
            lines.push("=== Structured content ===".to_string());
            lines.push(structured_payload(value));
        }
    }

    lines
}

/// Pretty-print a structured payload, falling back to the raw in-memory
/// value if serialization fails.
pub fn structured_payload(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// An absent-in-spirit payload: null, or an empty mapping/sequence.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call_response(value: Value) -> ToolsCallResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn listing_has_one_line_per_tool() {
        let tools: Vec<Tool> = serde_json::from_value(json!([
            {"name": "search", "title": "Search"},
            {"name": "fetch"},
            {"name": "code_sample_search", "annotations": {"title": "Code Samples"}}
        ]))
        .unwrap();

        let lines = tool_listing(&tools);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], " - search (title=Search)");
        assert_eq!(lines[1], " - fetch (title=fetch)");
        assert_eq!(lines[2], " - code_sample_search (title=Code Samples)");
    }

    #[test]
    fn empty_listing_renders_zero_lines() {
        assert!(tool_listing(&[]).is_empty());
    }

    #[test]
    fn text_blocks_are_one_indexed() {
        let result = call_response(json!({
            "content": [
                {"type": "text", "text": "hello"},
                {"type": "text", "text": "world"}
            ]
        }));

        let lines = call_result(&result);
        assert_eq!(lines[0], "[Text #1]");
        assert_eq!(lines[1], "hello");
        assert_eq!(lines[3], "[Text #2]");
        assert_eq!(lines[4], "world");
    }

    #[test]
    fn unknown_blocks_render_opaquely() {
        let result = call_response(json!({
            "content": [
                {"type": "text", "text": "hello"},
                {"type": "audio", "mimeType": "audio/wav"}
            ]
        }));

        let lines = call_result(&result);
        let opaque = lines.iter().find(|l| l.starts_with("[Content #2]:")).unwrap();
        assert!(opaque.contains("audio/wav"));
    }

    #[test]
    fn empty_content_prints_the_notice_and_no_block_lines() {
        let result = call_response(json!({"content": []}));
        let lines = call_result(&result);
        assert_eq!(lines, vec!["No content blocks returned by the tool."]);
    }

    #[test]
    fn error_flag_notice_is_additive() {
        let result = call_response(json!({
            "content": [{"type": "text", "text": "partial answer"}],
            "isError": true
        }));

        let lines = call_result(&result);
        assert_eq!(lines[0], "Tool returned an error flag.");
        assert_eq!(lines[1], "[Text #1]");
        assert_eq!(lines[2], "partial answer");
    }

    #[test]
    fn structured_payload_is_pretty_printed() {
        let result = call_response(json!({
            "content": [{"type": "text", "text": "ok"}],
            "structuredContent": {"answers": [1, 2]}
        }));

        let lines = call_result(&result);
        let header = lines.iter().position(|l| l == "=== Structured content ===");
        let header = header.expect("structured section expected");
        assert!(lines[header + 1].contains("\"answers\""));
        assert!(lines[header + 1].contains('\n'));
    }

    #[test]
    fn empty_structured_payload_is_omitted() {
        let result = call_response(json!({
            "content": [{"type": "text", "text": "ok"}],
            "structuredContent": {}
        }));
        assert!(
            !call_result(&result)
                .iter()
                .any(|l| l.contains("Structured content"))
        );
    }

    #[test]
    fn missing_structured_payload_is_omitted() {
        let result = call_response(json!({
            "content": [{"type": "text", "text": "ok"}]
        }));
        assert!(
            !call_result(&result)
                .iter()
                .any(|l| l.contains("Structured content"))
        );
    }
}
