use crate::server::GatewayServer;
use serde_json::{json, Value};

use super::dto::{McpError, McpRequest, McpResponse, ToolCall};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub async fn handle_request(server: &GatewayServer, request: McpRequest) -> McpResponse {
    match request.method.as_str() {
        "initialize" => success(request.id, initialize_result()),
        "notifications/initialized" => success(request.id, json!({})),
        "ping" => success(request.id, json!({ "ok": true })),
        "tools/list" => match serde_json::to_value(server.get_tools()) {
            Ok(tools) => success(request.id, json!({ "tools": tools })),
            Err(e) => error(
                request.id,
                -32603,
                format!("Failed to serialize tools: {}", e),
            ),
        },
        "tools/call" => {
            if let Some(params) = request.params {
                if let Ok(tool_call) = serde_json::from_value::<ToolCall>(params) {
                    let result = call_tool_result(server, tool_call).await;
                    success(request.id, result)
                } else {
                    error(request.id, -32602, "Invalid tool call parameters")
                }
            } else {
                error(request.id, -32602, "Missing parameters")
            }
        }
        _ => error(
            request.id,
            -32601,
            format!("Method not found: {}", request.method),
        ),
    }
}

/// Runs the dispatcher and renders the MCP tool-result wrapper. Dispatch
/// failures stay in-band as `isError: true`, never as a transport error.
pub(crate) async fn call_tool_result(server: &GatewayServer, tool_call: ToolCall) -> Value {
    match server.call_tool(tool_call).await {
        Ok(payload) => {
            let text = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|_| payload.to_string());
            content_result(text, false)
        }
        Err(e) => {
            tracing::warn!("Tool call failed: {}", e);
            content_result(format!("Error: {}", e), true)
        }
    }
}

pub(crate) fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": "notion-mcp-gateway",
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

pub(crate) fn content_result(text: String, is_error: bool) -> Value {
    json!({
        "content": [
            { "type": "text", "text": text }
        ],
        "isError": is_error
    })
}

pub(crate) fn parse_error(details: String) -> McpResponse {
    McpResponse {
        jsonrpc: "2.0".to_string(),
        id: None,
        result: None,
        error: Some(McpError {
            code: -32700,
            message: "Parse error".to_string(),
            data: Some(json!({ "details": details })),
        }),
    }
}

fn success(id: Option<Value>, result: Value) -> McpResponse {
    McpResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: Some(result),
        error: None,
    }
}

fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> McpResponse {
    McpResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: None,
        error: Some(McpError {
            code,
            message: message.into(),
            data: None,
        }),
    }
}
