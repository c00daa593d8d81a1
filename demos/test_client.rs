// Minimal example: drive the JSON-RPC handler directly against a live
// Notion workspace. Requires NOTION_API_KEY in the environment.
use anyhow::Result;
use notion_mcp_gateway::mcp::dto::McpRequest;
use notion_mcp_gateway::mcp::handler;
use notion_mcp_gateway::{GatewayConfig, GatewayServer};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env()?;
    let server = GatewayServer::new(config);

    println!("Available tools:");
    for tool in server.get_tools() {
        println!(" - {}: {}", tool.name, tool.description);
    }

    let list = McpRequest {
        jsonrpc: "2.0".to_string(),
        id: Some(json!(1)),
        method: "tools/list".to_string(),
        params: None,
    };
    let response = handler::handle_request(&server, list).await;
    println!("tools/list -> {}", serde_json::to_string(&response)?);

    let search = McpRequest {
        jsonrpc: "2.0".to_string(),
        id: Some(json!(2)),
        method: "tools/call".to_string(),
        params: Some(json!({
            "name": "notion_search",
            "arguments": { "query": "meeting notes" }
        })),
    };
    let response = handler::handle_request(&server, search).await;
    println!("notion_search -> {}", serde_json::to_string(&response)?);

    Ok(())
}
