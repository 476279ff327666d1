//! MCP (Model Context Protocol) implementation.

mod prompts;
mod resources;
mod search_tool;
pub mod server;
mod tools;

pub use prompts::{RecentCategoryPrompt, RECENT_CATEGORY_PROMPT};
pub use resources::{TaxonomyResource, TAXONOMY_RESOURCE};
pub use search_tool::SearchHandler;
pub use server::{listen_addr, McpServer};
pub use tools::{search_schema, Tool, ToolError, ToolHandler, ToolRegistry, SEARCH_TOOL_NAME};
