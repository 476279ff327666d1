//! Sparse record views returned to tool callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{Author, Category, Link};

/// A projection of a [`CatalogRecord`](super::CatalogRecord) where every
/// attribute is independently present or absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<Author>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<Category>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstract_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

impl RecordView {
    /// True when no attribute is populated
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Tool result: the projected views in upstream order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<RecordView>,
}

impl SearchResults {
    pub fn new(entries: Vec<RecordView>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_results_omit_entries() {
        let json = serde_json::to_value(SearchResults::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));

        let results = SearchResults::new(vec![RecordView {
            id: Some("2401.00001v1".to_string()),
            ..RecordView::default()
        }]);
        assert_eq!(
            serde_json::to_value(results).unwrap(),
            serde_json::json!({ "entries": [{ "id": "2401.00001v1" }] })
        );
    }
}
