pub mod notion;

pub use notion::{
    CreatePageInput, GetPageInput, NotionTools, QueryDatabaseInput, SearchInput, UpdatePageInput,
};
