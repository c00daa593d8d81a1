pub mod dto;
pub mod handler;
pub mod helpers;
pub mod implementation;

pub use dto::{
    CreatePageInput, GetPageInput, QueryDatabaseInput, SearchInput, UpdatePageInput,
};
pub use handler::{create_page, get_page, list_databases, query_database, search, update_page};
pub use implementation::NotionTools;
