//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::mcp::search_tool::SearchHandler;
use crate::search::SearchError;
use crate::sources::ArxivApi;

/// Name of the search tool
pub const SEARCH_TOOL_NAME: &str = "arxiv-search";

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "arxiv-search")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Errors returned by tool handlers
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The arguments did not match the input schema
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Search(#[from] SearchError),

    /// The result could not be serialized
    #[error("Failed to encode result: {0}")]
    Encode(String),
}

impl ToolError {
    /// Whether the caller is at fault (bad arguments or criteria)
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            ToolError::InvalidArguments(_) | ToolError::Search(SearchError::Query(_))
        )
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;
}

/// Registry for all MCP tools
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the search tool bound to `source`
    pub fn from_source(source: Arc<dyn ArxivApi>) -> Self {
        let mut registry = Self::new();
        registry.register(Tool {
            name: SEARCH_TOOL_NAME.to_string(),
            description: "Searches for papers on arXiv".to_string(),
            input_schema: search_schema(),
            handler: Arc::new(SearchHandler::new(source)),
        });
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// All registered tools
    pub fn all(&self) -> impl Iterator<Item = &Tool> {
        self.tools.values()
    }

    /// Registered tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::InvalidArguments(format!("Unknown tool: {}", name)))?;
        tool.handler.execute(args).await
    }
}

/// Input schema for `arxiv-search`
pub fn search_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "title": {
                "type": "string"
            },
            "author": {
                "type": "string"
            },
            "abstract": {
                "type": "string"
            },
            "subject_category": {
                "type": "string",
                "description": "subject category, using arXiv category taxonomy"
            },
            "submitted_since": {
                "type": "string",
                "description": "date in YYYY-MM-DD",
                "pattern": "\\d{4}-\\d{2}-\\d{2}"
            },
            "submitted_before": {
                "type": "string",
                "description": "date in YYYY-MM-DD",
                "pattern": "\\d{4}-\\d{2}-\\d{2}"
            },
            "submitted_relative": {
                "type": "string",
                "description": "relative date in days, weeks, months, or years from today",
                "pattern": "[0-9]+ (days|weeks|months|years)"
            },
            "all": {
                "type": "string",
                "description": "search within title, author, abstract, subject"
            },
            "id_list": {
                "type": "array",
                "items": { "type": "string" },
                "description": "array of arXiv IDs to search within. Can be passed alone to retrieve specific papers"
            },
            "max": {
                "type": "integer",
                "minimum": 0,
                "description": "maximum number of results, 20 when omitted"
            },
            "return_fields": {
                "type": "array",
                "items": { "type": "string" },
                "description": "array of fields to return. Returns all if empty"
            }
        },
        "additionalProperties": false
    })
}
