use super::helpers::build_url;
use crate::config::NotionApiConfig;
use crate::error::{GatewayError, Result};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Thin client over the Notion REST API. Owns the bearer token and the
/// `Notion-Version` header; pagination, retries and rate limiting stay on
/// Notion's side of the wire.
#[derive(Clone)]
pub struct NotionTools {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_version: String,
}

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a Value>,
}

#[derive(Debug, Serialize)]
struct CreatePageBody<'a> {
    parent: &'a Value,
    properties: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<&'a Value>,
}

#[derive(Debug, Serialize)]
struct UpdatePageBody<'a> {
    properties: &'a Value,
}

#[derive(Debug, Serialize)]
struct QueryDatabaseBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sorts: Option<&'a Value>,
}

#[derive(Debug, serde::Deserialize)]
struct NotionErrorBody {
    message: String,
}

impl NotionTools {
    pub fn new(config: &NotionApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Notion-MCP-Gateway/0.1.0")
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
        }
    }

    pub async fn search(&self, query: Option<&str>, filter: Option<&Value>) -> Result<Value> {
        let url = build_url(&self.base_url, &["search"]);
        let request = self.http.post(&url).json(&SearchBody { query, filter });
        self.execute(request).await
    }

    pub async fn create_page(
        &self,
        parent: &Value,
        properties: &Value,
        children: Option<&Value>,
    ) -> Result<Value> {
        let url = build_url(&self.base_url, &["pages"]);
        let request = self.http.post(&url).json(&CreatePageBody {
            parent,
            properties,
            children,
        });
        self.execute(request).await
    }

    pub async fn get_page(&self, page_id: &str) -> Result<Value> {
        let url = build_url(&self.base_url, &["pages", page_id]);
        self.execute(self.http.get(&url)).await
    }

    pub async fn update_page(&self, page_id: &str, properties: &Value) -> Result<Value> {
        let url = build_url(&self.base_url, &["pages", page_id]);
        let request = self.http.patch(&url).json(&UpdatePageBody { properties });
        self.execute(request).await
    }

    pub async fn query_database(
        &self,
        database_id: &str,
        filter: Option<&Value>,
        sorts: Option<&Value>,
    ) -> Result<Value> {
        let url = build_url(&self.base_url, &["databases", database_id, "query"]);
        let request = self
            .http
            .post(&url)
            .json(&QueryDatabaseBody { filter, sorts });
        self.execute(request).await
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = request
            .bearer_auth(&self.api_key)
            .header("Notion-Version", &self.api_version)
            .send()
            .await
            .map_err(GatewayError::NetworkError)?;

        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(GatewayError::NetworkError);
        }

        // Notion error bodies carry their own message field; forward it as-is
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<NotionErrorBody>(&body)
            .map(|err| err.message)
            .unwrap_or_else(|_| format!("Notion API returned {}", status));
        Err(GatewayError::upstream(message))
    }
}
