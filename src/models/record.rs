//! Catalog record model as returned by the arXiv API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An author entry on an arXiv record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Author {
    /// Display name
    pub name: String,

    /// Affiliations reported through `arxiv:affiliation`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<String>,
}

impl Author {
    /// Create an author with no affiliations
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            affiliations: Vec::new(),
        }
    }
}

/// A subject category tag (e.g. `cs.AI`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Category {
    /// Taxonomy tag
    pub term: String,

    /// Classification scheme URI
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scheme: String,
}

impl Category {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            scheme: String::new(),
        }
    }
}

/// A link attached to a record (abstract page, PDF, DOI resolver)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Link {
    pub href: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rel: String,

    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub content_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

/// A full arXiv catalog record
///
/// Text attributes the feed omits are left empty rather than absent, so a
/// record always has a value for every attribute a view can select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// arXiv identifier including version (e.g. `2301.12345v2`)
    pub id: String,

    pub title: String,

    /// First version submission time
    pub published: DateTime<Utc>,

    /// Latest version submission time
    pub updated: DateTime<Utc>,

    /// Abstract text
    pub summary: String,

    pub authors: Vec<Author>,

    pub categories: Vec<Category>,

    pub primary_category: Category,

    pub links: Vec<Link>,

    /// Author comment (page counts, conference notes)
    pub comment: String,

    pub journal_reference: String,

    pub doi: String,

    /// Abstract page URL
    pub abstract_url: String,

    /// Direct PDF URL
    pub pdf_url: String,
}

impl CatalogRecord {
    /// Create a record with the required attributes; everything else is empty
    pub fn new(id: impl Into<String>, title: impl Into<String>, published: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            published,
            updated: published,
            summary: String::new(),
            authors: Vec::new(),
            categories: Vec::new(),
            primary_category: Category::default(),
            links: Vec::new(),
            comment: String::new(),
            journal_reference: String::new(),
            doi: String::new(),
            abstract_url: String::new(),
            pdf_url: String::new(),
        }
    }

    /// Author names in feed order
    pub fn author_names(&self) -> Vec<&str> {
        self.authors.iter().map(|a| a.name.as_str()).collect()
    }
}
