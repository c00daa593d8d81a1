use serde_json::{json, Value};

pub(crate) fn build_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.push_str(segment.trim_matches('/'));
    }
    url
}

/// Picks the parent reference type for a page-create call. Notion database
/// ids arrive in the dashed UUID form (36 chars including hyphens); anything
/// else is treated as a page id.
pub(crate) fn parent_reference(parent_id: &str) -> Value {
    if parent_id.contains('-') && parent_id.len() == 36 {
        json!({ "database_id": parent_id })
    } else {
        json!({ "page_id": parent_id })
    }
}

pub(crate) fn title_property(title: &str) -> Value {
    json!({
        "title": {
            "title": [
                { "text": { "content": title } }
            ]
        }
    })
}

/// One paragraph block holding `content` as its only rich-text run.
/// Absent or empty content means the page is created with no body blocks.
pub(crate) fn paragraph_children(content: Option<&str>) -> Option<Value> {
    match content {
        Some(text) if !text.is_empty() => Some(json!([
            {
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [
                        { "type": "text", "text": { "content": text } }
                    ]
                }
            }
        ])),
        _ => None,
    }
}

/// Notion has no dedicated list-databases endpoint; search is restricted to
/// objects whose `object` property equals `"database"` instead.
pub(crate) fn database_filter() -> Value {
    json!({ "property": "object", "value": "database" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_segments() {
        assert_eq!(
            build_url("https://api.notion.com/v1/", &["pages", "abc123"]),
            "https://api.notion.com/v1/pages/abc123"
        );
    }

    #[test]
    fn dashed_uuid_routes_to_database_parent() {
        let id = "a1b2c3d4-e5f6-7890-abcd-ef1234567890";
        assert_eq!(id.len(), 36);
        let parent = parent_reference(id);
        assert_eq!(parent["database_id"], id);
        assert!(parent.get("page_id").is_none());
    }

    #[test]
    fn undashed_id_routes_to_page_parent() {
        let id = "a1b2c3d4e5f67890abcdef1234567890";
        let parent = parent_reference(id);
        assert_eq!(parent["page_id"], id);
    }

    #[test]
    fn thirty_six_chars_without_hyphen_routes_to_page_parent() {
        let id = "a".repeat(36);
        let parent = parent_reference(&id);
        assert!(parent.get("database_id").is_none());
        assert_eq!(parent["page_id"], id.as_str());
    }

    #[test]
    fn hyphenated_id_of_other_length_routes_to_page_parent() {
        let parent = parent_reference("short-id");
        assert!(parent.get("database_id").is_none());
        assert_eq!(parent["page_id"], "short-id");
    }

    #[test]
    fn title_property_is_single_rich_text_run() {
        let properties = title_property("My Page");
        assert_eq!(properties["title"]["title"][0]["text"]["content"], "My Page");
        assert_eq!(properties["title"]["title"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_content_yields_no_children() {
        assert!(paragraph_children(None).is_none());
        assert!(paragraph_children(Some("")).is_none());
    }

    #[test]
    fn nonempty_content_yields_one_paragraph_block() {
        let children = paragraph_children(Some("hello world")).unwrap();
        let blocks = children.as_array().unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["type"], "paragraph");
        assert_eq!(
            blocks[0]["paragraph"]["rich_text"][0]["text"]["content"],
            "hello world"
        );
    }
}
