//! `arxiv-search` tool handler.

use std::sync::Arc;

use serde_json::Value;

use super::tools::{ToolError, ToolHandler};
use crate::models::SearchCriteria;
use crate::search;
use crate::sources::ArxivApi;
use crate::taxonomy::find_category;

/// Runs search criteria against the configured source
#[derive(Debug, Clone)]
pub struct SearchHandler {
    source: Arc<dyn ArxivApi>,
}

impl SearchHandler {
    pub fn new(source: Arc<dyn ArxivApi>) -> Self {
        Self { source }
    }
}

/// Decode tool arguments; a missing argument object means "no criteria"
fn parse_criteria(args: Value) -> Result<SearchCriteria, ToolError> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// The requested subject category when it is not in the embedded taxonomy
fn unrecognized_category(criteria: &SearchCriteria) -> Option<&str> {
    let tag = criteria.subject_category.as_str();
    if tag.is_empty() {
        return None;
    }
    match find_category(tag) {
        Ok(Some(_)) => None,
        Ok(None) => Some(tag),
        Err(e) => {
            tracing::warn!("Taxonomy unavailable: {}", e);
            None
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for SearchHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let criteria = parse_criteria(args)?;
        tracing::debug!(?criteria, "arxiv-search called");
        if let Some(tag) = unrecognized_category(&criteria) {
            // arXiv answers an unknown cat: with zero results rather than an error
            tracing::warn!("Category {:?} is not in the arXiv taxonomy", tag);
        }

        let results = search::search(self.source.as_ref(), &criteria).await?;
        tracing::debug!(entries = results.len(), "arxiv-search finished");

        serde_json::to_value(results).map_err(|e| ToolError::Encode(e.to_string()))
    }
}
