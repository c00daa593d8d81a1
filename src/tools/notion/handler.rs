use super::dto::{CreatePageInput, GetPageInput, QueryDatabaseInput, SearchInput, UpdatePageInput};
use super::helpers;
use super::implementation::NotionTools;
use crate::error::Result;
use serde_json::Value;

pub async fn search(tools: &NotionTools, input: SearchInput) -> Result<Value> {
    tools
        .search(Some(&input.query), input.filter.as_ref())
        .await
}

pub async fn create_page(tools: &NotionTools, input: CreatePageInput) -> Result<Value> {
    let parent = helpers::parent_reference(&input.parent_id);
    let properties = helpers::title_property(&input.title);
    let children = helpers::paragraph_children(input.content.as_deref());
    tools
        .create_page(&parent, &properties, children.as_ref())
        .await
}

pub async fn get_page(tools: &NotionTools, input: GetPageInput) -> Result<Value> {
    tools.get_page(&input.page_id).await
}

pub async fn update_page(tools: &NotionTools, input: UpdatePageInput) -> Result<Value> {
    tools.update_page(&input.page_id, &input.properties).await
}

pub async fn list_databases(tools: &NotionTools) -> Result<Value> {
    tools.search(None, Some(&helpers::database_filter())).await
}

pub async fn query_database(tools: &NotionTools, input: QueryDatabaseInput) -> Result<Value> {
    tools
        .query_database(
            &input.database_id,
            input.filter.as_ref(),
            input.sorts.as_ref(),
        )
        .await
}
