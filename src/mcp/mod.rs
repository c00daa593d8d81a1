pub mod dto;
pub mod handler;

pub use dto::{McpError, McpRequest, McpResponse, Tool, ToolCall};
