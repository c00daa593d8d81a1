use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NOTION_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub notion: NotionApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub api_version: String,
}

impl GatewayConfig {
    /// Reads configuration from the environment. Fails when `NOTION_API_KEY`
    /// is absent, so the process never starts serving without a credential.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("NOTION_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GatewayError::config_error("NOTION_API_KEY is required"))?;

        let mut config = Self {
            server: ServerConfig {
                port: 3000,
                log_level: "info".to_string(),
            },
            notion: NotionApiConfig {
                api_key,
                base_url: DEFAULT_NOTION_BASE_URL.to_string(),
                api_version: DEFAULT_NOTION_VERSION.to_string(),
            },
        };

        // Override with environment variables
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| GatewayError::config_error("Invalid PORT"))?;
        }

        if let Ok(log_level) = std::env::var("NOTION_MCP_LOG_LEVEL") {
            config.server.log_level = log_level;
        }

        if let Ok(base_url) = std::env::var("NOTION_API_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.notion.base_url = base_url;
            }
        }

        if let Ok(api_version) = std::env::var("NOTION_VERSION") {
            if !api_version.trim().is_empty() {
                config.notion.api_version = api_version;
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: GatewayConfig = toml::from_str(&content)
            .map_err(|e| GatewayError::config_error(format!("Failed to parse config file: {}", e)))?;

        if config.notion.api_key.trim().is_empty() {
            return Err(GatewayError::config_error("notion.api_key must not be empty"));
        }

        Ok(config)
    }
}
