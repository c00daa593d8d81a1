use notion_mcp_gateway::config::{GatewayConfig, NotionApiConfig, ServerConfig};
use notion_mcp_gateway::mcp::dto::ToolCall;
use notion_mcp_gateway::{GatewayError, GatewayServer};
use serde_json::json;

fn test_server() -> GatewayServer {
    let config = GatewayConfig {
        server: ServerConfig {
            port: 3000,
            log_level: "info".to_string(),
        },
        notion: NotionApiConfig {
            api_key: "secret_test".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            api_version: "2022-06-28".to_string(),
        },
    };
    GatewayServer::new(config)
}

#[tokio::test]
async fn unknown_tool_never_reaches_upstream() {
    let server = test_server();
    let call = ToolCall {
        name: "unknown_tool".to_string(),
        arguments: json!({}),
    };
    let err = server.call_tool(call).await.unwrap_err();
    assert!(matches!(err, GatewayError::UnknownTool(_)));
    assert_eq!(err.to_string(), "Unknown tool: unknown_tool");
}

#[tokio::test]
async fn missing_required_argument_is_reported() {
    let server = test_server();
    let call = ToolCall {
        name: "notion_search".to_string(),
        arguments: json!({ "filter": { "property": "object", "value": "page" } }),
    };
    let err = server.call_tool(call).await.unwrap_err();
    assert!(matches!(err, GatewayError::SerializationError(_)));
}

#[tokio::test]
async fn malformed_argument_bag_is_reported() {
    let server = test_server();
    let call = ToolCall {
        name: "notion_get_page".to_string(),
        arguments: json!("nope"),
    };
    let err = server.call_tool(call).await.unwrap_err();
    assert!(matches!(err, GatewayError::SerializationError(_)));
}
