//! End-to-end search: compose, execute, project.

use chrono::{DateTime, Utc};

use crate::models::{SearchCriteria, SearchResults};
use crate::projection::{project_fields, Fields};
use crate::query::{compose, QueryError};
use crate::sources::{ArxivApi, SourceError};

/// Errors surfaced by a search request
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The criteria could not be turned into a query; nothing was sent upstream
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The upstream search failed
    #[error(transparent)]
    Upstream(#[from] SourceError),
}

/// Run `criteria` against `source`, evaluating date windows at `now`
pub async fn search_at(
    source: &dyn ArxivApi,
    criteria: &SearchCriteria,
    now: DateTime<Utc>,
) -> Result<SearchResults, SearchError> {
    let (expression, params) = compose(criteria, now)?;
    let query = expression.to_string();

    let records = source.search(&query, &params).await?;

    let fields = Fields::from_names(criteria.return_fields.as_slice());
    let entries = records
        .iter()
        .map(|record| project_fields(record, fields))
        .collect();

    Ok(SearchResults::new(entries))
}

/// Run `criteria` against `source`, capturing "now" once for the request
pub async fn search(
    source: &dyn ArxivApi,
    criteria: &SearchCriteria,
) -> Result<SearchResults, SearchError> {
    search_at(source, criteria, Utc::now()).await
}
