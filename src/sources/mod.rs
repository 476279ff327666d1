//! Upstream search collaborators.
//!
//! The [`ArxivApi`] trait is the seam between the query pipeline and the
//! network. [`ArxivClient`] talks to the real export API; [`MockSource`]
//! returns canned records and records what it was asked for.

mod arxiv;
mod feed;
pub mod mock;

pub use arxiv::{ArxivClient, ARXIV_API_URL};
pub use feed::parse_feed;
pub use mock::MockSource;

use async_trait::async_trait;

use crate::models::CatalogRecord;
use crate::query::ExecutionParams;

/// A search capability over the arXiv catalog
///
/// Implementations execute `query` exactly as given. They perform no retries;
/// failures are returned to the caller unchanged.
#[async_trait]
pub trait ArxivApi: Send + Sync + std::fmt::Debug {
    /// Run a composed query and return the matching records in upstream order
    async fn search(
        &self,
        query: &str,
        params: &ExecutionParams,
    ) -> Result<Vec<CatalogRecord>, SourceError>;
}

/// Errors that can occur when talking to the search API
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// The API answered with an error status or an error entry
    #[error("API error: {0}")]
    Api(String),

    /// Invalid client configuration (base URL, user agent)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::InvalidRequest(format!("URL: {}", err))
    }
}
