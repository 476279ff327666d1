//! arXiv category taxonomy.
//!
//! The taxonomy ships as a JSON asset embedded at compile time and is served
//! verbatim through the `category-taxonomy` resource. [`taxonomy`] parses it
//! once on first use. The asset is regenerated with [`scrape_taxonomy`].

mod scrape;

pub use scrape::{extract_taxonomy, scrape_taxonomy, TAXONOMY_PAGE_URL};

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Embedded taxonomy document
pub const TAXONOMY_JSON: &str = include_str!("../../assets/arxiv-taxonomy.json");

/// Resource URI the taxonomy is published under
pub const TAXONOMY_URI: &str = "file://arxiv/taxonomy.json";

static TAXONOMY: OnceLock<Result<Vec<Field>, String>> = OnceLock::new();

/// A top-level subject field (e.g. "Computer Science")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub categories: Vec<TaxonomyCategory>,
}

/// One taxonomy entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyCategory {
    /// Tag used in `cat:` queries, e.g. `cs.AI`
    pub tag: String,
    /// Human-readable name
    pub label: String,
    pub description: String,
}

/// Errors from loading or regenerating the taxonomy
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("Invalid taxonomy JSON: {0}")]
    Json(String),

    #[error("Failed to fetch taxonomy page: {0}")]
    Fetch(String),

    #[error("Unexpected taxonomy page layout: {0}")]
    Layout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The parsed embedded taxonomy
pub fn taxonomy() -> Result<&'static [Field], TaxonomyError> {
    TAXONOMY
        .get_or_init(|| serde_json::from_str(TAXONOMY_JSON).map_err(|e| e.to_string()))
        .as_ref()
        .map(Vec::as_slice)
        .map_err(|e| TaxonomyError::Json(e.clone()))
}

/// Find a category by tag, ignoring case
pub fn find_category(tag: &str) -> Result<Option<&'static TaxonomyCategory>, TaxonomyError> {
    Ok(taxonomy()?
        .iter()
        .flat_map(|field| field.categories.iter())
        .find(|c| c.tag.eq_ignore_ascii_case(tag)))
}
