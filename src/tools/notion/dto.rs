use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchInput {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePageInput {
    pub parent_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetPageInput {
    pub page_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePageInput {
    pub page_id: String,
    pub properties: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryDatabaseInput {
    pub database_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Value>,
}
