//! # arXiv MCP
//!
//! A Model Context Protocol (MCP) server for searching the arXiv catalog.
//!
//! ## Architecture
//!
//! - [`query`]: turns [`SearchCriteria`] into an arXiv query expression
//! - [`sources`]: the upstream search seam and the export API client
//! - [`projection`]: reduces records to the fields a caller asked for
//! - [`search`]: compose, execute, project
//! - [`taxonomy`]: the embedded category taxonomy and its scraper
//! - [`mcp`]: MCP tool, prompt and resource handlers and the server
//! - [`config`]: Configuration management

pub mod config;
pub mod mcp;
pub mod models;
pub mod projection;
pub mod query;
pub mod search;
pub mod sources;
pub mod taxonomy;
pub mod utils;

// Re-export commonly used types
pub use models::{CatalogRecord, RecordView, SearchCriteria, SearchResults};
pub use search::{search, SearchError};
pub use sources::{ArxivApi, ArxivClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
