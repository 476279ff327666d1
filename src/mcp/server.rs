//! MCP server implementation using pmcp (Pragmatic AI's rust-mcp-sdk).
//!
//! Exposes the `arxiv-search` tool, the `recent-category` prompt and the
//! `category-taxonomy` resource over stdio or streamable HTTP.

use crate::mcp::prompts::{RecentCategoryPrompt, RECENT_CATEGORY_PROMPT};
use crate::mcp::resources::TaxonomyResource;
use crate::mcp::tools::{ToolError, ToolRegistry};
use crate::sources::ArxivApi;
use async_trait::async_trait;
use pmcp::{
    server::streamable_http_server::StreamableHttpServer, Error, RequestHandlerExtra, Server,
    ServerCapabilities, ToolHandler, ToolInfo,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Server name reported during initialization
pub const SERVER_NAME: &str = "arxiv-mcp";

/// The MCP server for arXiv search
#[derive(Debug, Clone)]
pub struct McpServer {
    server: Arc<Mutex<Server>>,
}

impl McpServer {
    /// Create a new MCP server searching through `source`
    pub fn new(source: Arc<dyn ArxivApi>) -> Result<Self, pmcp::Error> {
        let tools = ToolRegistry::from_source(source);
        let server = Self::build_server_impl(tools)?;
        Ok(Self {
            server: Arc::new(Mutex::new(server)),
        })
    }

    /// Shared handle to the underlying pmcp server
    pub fn inner(&self) -> Arc<Mutex<Server>> {
        self.server.clone()
    }

    fn build_server_impl(tools: ToolRegistry) -> Result<Server, pmcp::Error> {
        let capabilities = ServerCapabilities {
            tools: Some(Default::default()),
            prompts: Some(Default::default()),
            resources: Some(Default::default()),
            ..Default::default()
        };

        let mut builder = Server::builder()
            .name(SERVER_NAME)
            .version(env!("CARGO_PKG_VERSION"))
            .capabilities(capabilities);

        for tool in tools.all() {
            let tool_handler = ToolWrapper {
                name: tool.name.clone(),
                description: Some(tool.description.clone()),
                input_schema: tool.input_schema.clone(),
                handler: tool.handler.clone(),
            };
            builder = builder.tool(tool_handler.name.clone(), tool_handler);
        }

        builder
            .prompt(RECENT_CATEGORY_PROMPT, RecentCategoryPrompt)
            .resources(TaxonomyResource)
            .build()
    }

    /// Run the server in stdio mode (for Claude Desktop and other MCP clients)
    pub async fn run(self) -> Result<(), pmcp::Error> {
        tracing::info!("Starting MCP server in stdio mode");

        // run_stdio() takes ownership of the Server
        let server = Arc::try_unwrap(self.server)
            .map_err(|_| Error::internal("Cannot unwrap Arc - multiple references exist"))?
            .into_inner();

        server.run_stdio().await
    }

    /// Run the server over streamable HTTP on `addr`
    pub async fn run_http(&self, addr: SocketAddr) -> Result<(SocketAddr, JoinHandle<()>), pmcp::Error> {
        tracing::info!("Starting MCP server in HTTP mode on {}", addr);

        let http_server = StreamableHttpServer::new(addr, self.server.clone());
        http_server.start().await
    }
}

/// Parse `host:port` into a socket address
pub fn listen_addr(host: &str, port: u16) -> Result<SocketAddr, pmcp::Error> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| Error::invalid_params(format!("Invalid address: {}", e)))
}

/// Map a tool failure onto the protocol error kinds
fn to_protocol_error(err: ToolError) -> Error {
    if err.is_invalid_request() {
        Error::invalid_params(err.to_string())
    } else {
        tracing::warn!("Tool call failed: {}", err);
        Error::internal(err.to_string())
    }
}

/// Wrapper for adapting our Tool to pmcp's ToolHandler
#[derive(Clone)]
struct ToolWrapper {
    name: String,
    description: Option<String>,
    input_schema: Value,
    handler: Arc<dyn crate::mcp::tools::ToolHandler>,
}

#[async_trait]
impl ToolHandler for ToolWrapper {
    async fn handle(&self, args: Value, _extra: RequestHandlerExtra) -> Result<Value, Error> {
        self.handler.execute(args).await.map_err(to_protocol_error)
    }

    fn metadata(&self) -> Option<ToolInfo> {
        Some(ToolInfo::new(
            self.name.clone(),
            self.description.clone(),
            self.input_schema.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryError;
    use crate::search::SearchError;
    use crate::sources::{MockSource, SourceError};

    #[test]
    fn test_listen_addr() {
        assert_eq!(
            listen_addr("0.0.0.0", 8888).unwrap(),
            "0.0.0.0:8888".parse::<SocketAddr>().unwrap()
        );
        assert!(listen_addr("not a host", 1).is_err());
    }

    #[test]
    fn test_error_mapping() {
        let query = to_protocol_error(ToolError::Search(SearchError::Query(
            QueryError::InvalidUnit("fortnights".to_string()),
        )));
        assert!(query.to_string().contains("fortnights"));

        let upstream = to_protocol_error(ToolError::Search(SearchError::Upstream(
            SourceError::Api("down".to_string()),
        )));
        assert!(upstream.to_string().contains("down"));
    }

    #[test]
    fn test_server_builds() {
        let server = McpServer::new(Arc::new(MockSource::new()));
        assert!(server.is_ok());
    }
}
