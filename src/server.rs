use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::mcp::dto::{Tool, ToolCall};
use crate::tools::notion::{
    self, CreatePageInput, GetPageInput, NotionTools, QueryDatabaseInput, SearchInput,
    UpdatePageInput,
};
use serde_json::{json, Value};

pub struct GatewayServer {
    config: GatewayConfig,
    notion_tools: NotionTools,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig) -> Self {
        let notion_tools = NotionTools::new(&config.notion);
        Self {
            config,
            notion_tools,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The static tool catalog. Order is stable and the call has no side
    /// effects, so transports may invoke it as often as they like.
    pub fn get_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "notion_search".to_string(),
                description: "Search pages and databases in the Notion workspace".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Text to search for" },
                        "filter": { "type": "object", "description": "Optional Notion search filter" }
                    },
                    "required": ["query"]
                }),
            },
            Tool {
                name: "notion_create_page".to_string(),
                description: "Create a new page under a page or database parent".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "parent_id": { "type": "string", "description": "Parent page or database ID" },
                        "title": { "type": "string", "description": "Title of the new page" },
                        "content": { "type": "string", "description": "Optional paragraph of body text" }
                    },
                    "required": ["parent_id", "title"]
                }),
            },
            Tool {
                name: "notion_get_page".to_string(),
                description: "Retrieve a page by its ID".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "page_id": { "type": "string", "description": "ID of the page to retrieve" }
                    },
                    "required": ["page_id"]
                }),
            },
            Tool {
                name: "notion_update_page".to_string(),
                description: "Update the properties of an existing page".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "page_id": { "type": "string", "description": "ID of the page to update" },
                        "properties": { "type": "object", "description": "Property values to set" }
                    },
                    "required": ["page_id", "properties"]
                }),
            },
            Tool {
                name: "notion_list_databases".to_string(),
                description: "List all databases shared with the integration".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
            Tool {
                name: "notion_query_database".to_string(),
                description: "Query the entries of a database".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "database_id": { "type": "string", "description": "ID of the database to query" },
                        "filter": { "type": "object", "description": "Optional Notion query filter" },
                        "sorts": { "type": "array", "description": "Optional sort directives" }
                    },
                    "required": ["database_id"]
                }),
            },
        ]
    }

    /// Maps one tool invocation onto exactly one Notion API call. Unknown
    /// tool names fail before anything goes upstream.
    pub async fn call_tool(&self, tool_call: ToolCall) -> Result<Value> {
        tracing::info!(
            "Dispatching tool call: {} arguments={}",
            tool_call.name,
            tool_call.arguments
        );

        match tool_call.name.as_str() {
            "notion_search" => {
                let input: SearchInput = serde_json::from_value(tool_call.arguments)?;
                notion::search(&self.notion_tools, input).await
            }
            "notion_create_page" => {
                let input: CreatePageInput = serde_json::from_value(tool_call.arguments)?;
                notion::create_page(&self.notion_tools, input).await
            }
            "notion_get_page" => {
                let input: GetPageInput = serde_json::from_value(tool_call.arguments)?;
                notion::get_page(&self.notion_tools, input).await
            }
            "notion_update_page" => {
                let input: UpdatePageInput = serde_json::from_value(tool_call.arguments)?;
                notion::update_page(&self.notion_tools, input).await
            }
            "notion_list_databases" => notion::list_databases(&self.notion_tools).await,
            "notion_query_database" => {
                let input: QueryDatabaseInput = serde_json::from_value(tool_call.arguments)?;
                notion::query_database(&self.notion_tools, input).await
            }
            _ => Err(GatewayError::UnknownTool(tool_call.name)),
        }
    }
}
