//! arXiv export API client.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::ArxivConfig;
use crate::models::CatalogRecord;
use crate::query::ExecutionParams;
use crate::sources::{parse_feed, ArxivApi, SourceError};
use crate::utils::HttpClient;

/// Base URL for arXiv API
pub const ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";

/// arXiv search client
///
/// Issues one request per search. Pagination beyond the first page and retry
/// policy are left to callers.
#[derive(Debug, Clone)]
pub struct ArxivClient {
    client: Arc<HttpClient>,
    base_url: Url,
}

impl ArxivClient {
    /// Create a client against the public arXiv API
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(HttpClient::new()?),
            base_url: Url::parse(ARXIV_API_URL)?,
        })
    }

    /// Create a client from configuration
    pub fn from_config(config: &ArxivConfig) -> Result<Self, SourceError> {
        let client = HttpClient::with_options(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self {
            client: Arc::new(client),
            base_url: Url::parse(&config.api_url)?,
        })
    }

    /// Create with a custom HTTP client and endpoint (for testing)
    pub fn with_client(client: Arc<HttpClient>, base_url: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Build the request URL for a composed query
    ///
    /// `search_query` and `id_list` are only sent when non-empty.
    pub fn build_url(&self, query: &str, params: &ExecutionParams) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if !query.is_empty() {
                pairs.append_pair("search_query", query);
            }
            if !params.id_list.is_empty() {
                pairs.append_pair("id_list", &params.id_list.join(","));
            }
            pairs
                .append_pair("start", "0")
                .append_pair("max_results", &params.max_results.to_string())
                .append_pair("sortBy", params.sort_by.as_str())
                .append_pair("sortOrder", params.sort_order.as_str());
        }
        url
    }
}

#[async_trait]
impl ArxivApi for ArxivClient {
    async fn search(
        &self,
        query: &str,
        params: &ExecutionParams,
    ) -> Result<Vec<CatalogRecord>, SourceError> {
        let url = self.build_url(query, params);
        tracing::debug!(%url, "Querying arXiv");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/atom+xml")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch arXiv results: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "arXiv API returned status: {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))?;

        let records = parse_feed(&body)?;
        tracing::debug!(count = records.len(), "arXiv returned records");
        Ok(records)
    }
}
