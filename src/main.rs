use anyhow::Result;
use notion_mcp_gateway::{http, GatewayConfig, GatewayServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notion_mcp_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load .env for local dev (if present)
    if dotenvy::dotenv().is_ok() {
        tracing::info!("Loaded .env");
    }

    tracing::info!("Starting Notion MCP Gateway");

    // A missing NOTION_API_KEY fails here, before any socket is bound
    let config = GatewayConfig::from_env()?;
    tracing::info!("Configuration loaded: port={}", config.server.port);

    let server = GatewayServer::new(config);

    let tools = server.get_tools();
    tracing::info!("Available tools: {}", tools.len());
    for tool in &tools {
        tracing::info!("  - {}: {}", tool.name, tool.description);
    }

    http::run_http_server(server).await?;
    Ok(())
}
