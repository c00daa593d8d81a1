use notion_mcp_gateway::config::{GatewayConfig, NotionApiConfig, ServerConfig};
use notion_mcp_gateway::mcp::dto::McpRequest;
use notion_mcp_gateway::mcp::handler;
use notion_mcp_gateway::GatewayServer;
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

fn request(id: serde_json::Value, method: &str, params: Option<serde_json::Value>) -> McpRequest {
    McpRequest {
        jsonrpc: "2.0".to_string(),
        id: Some(id),
        method: method.to_string(),
        params,
    }
}

#[tokio::test]
async fn initialize_reports_protocol_metadata() {
    let server = test_server();
    let resp = handler::handle_request(&server, request(json!(1), "initialize", None)).await;
    assert_eq!(resp.id, Some(json!(1)));
    assert!(resp.error.is_none());
    let result = resp.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "notion-mcp-gateway");
}

#[tokio::test]
async fn initialized_notification_is_acknowledged() {
    let server = test_server();
    let resp = handler::handle_request(
        &server,
        request(json!(2), "notifications/initialized", None),
    )
    .await;
    assert_eq!(resp.id, Some(json!(2)));
    assert!(resp.result.is_some());
    assert!(resp.error.is_none());
}

#[tokio::test]
async fn tools_list_returns_catalog() {
    let server = test_server();
    let resp = handler::handle_request(&server, request(json!(3), "tools/list", None)).await;
    let result = resp.result.unwrap();
    assert_eq!(result["tools"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn unknown_method_yields_32601() {
    let server = test_server();
    let resp =
        handler::handle_request(&server, request(json!("abc"), "resources/list", None)).await;
    assert_eq!(resp.id, Some(json!("abc")));
    assert!(resp.result.is_none());
    let err = resp.error.unwrap();
    assert_eq!(err.code, -32601);
}

#[tokio::test]
async fn tools_call_without_params_yields_32602() {
    let server = test_server();
    let resp = handler::handle_request(&server, request(json!(4), "tools/call", None)).await;
    let err = resp.error.unwrap();
    assert_eq!(err.code, -32602);
}

#[tokio::test]
async fn tools_call_with_malformed_params_yields_32602() {
    let server = test_server();
    let resp = handler::handle_request(
        &server,
        request(json!(5), "tools/call", Some(json!({ "arguments": {} }))),
    )
    .await;
    let err = resp.error.unwrap();
    assert_eq!(err.code, -32602);
}

#[tokio::test]
async fn dispatch_errors_stay_in_band() {
    let server = test_server();
    let resp = handler::handle_request(
        &server,
        request(
            json!(6),
            "tools/call",
            Some(json!({ "name": "does_not_exist", "arguments": {} })),
        ),
    )
    .await;
    assert_eq!(resp.id, Some(json!(6)));
    assert!(resp.error.is_none());
    let result = resp.result.unwrap();
    assert_eq!(result["isError"], true);
    assert_eq!(
        result["content"][0]["text"],
        "Error: Unknown tool: does_not_exist"
    );
}

#[tokio::test]
async fn ping_answers_ok() {
    let server = test_server();
    let resp = handler::handle_request(&server, request(json!(7), "ping", None)).await;
    assert_eq!(resp.result.unwrap()["ok"], true);
}
